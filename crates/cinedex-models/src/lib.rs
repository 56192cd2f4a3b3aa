pub mod category;
pub mod images;
pub mod movie;
pub mod movie_detail;
pub mod page;

pub use category::Category;
pub use images::{ImageKind, image_url};
pub use movie::MovieSummary;
pub use movie_detail::{CastMember, Credits, Genre, MovieDetail, ProductionCompany, Video, VideoList};
pub use page::ResultPage;
