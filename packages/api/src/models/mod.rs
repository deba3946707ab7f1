//! Wire models of the movie service.
//!
//! Field names follow the service's JSON (`_id`, camelCase); the capitalized
//! spellings some deployments emit (`Title`, `ImagePath`, ...) are accepted as
//! aliases on input.

pub mod movie;
pub mod user;

pub use movie::{Director, DirectorInfo, Genre, GenreInfo, Movie, MovieEntry};
pub use user::{parse_birthday, Ack, Credentials, LoginResponse, RegistrationInput, UserDetails, UserRecord};
