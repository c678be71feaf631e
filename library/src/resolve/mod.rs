pub mod change_key;
pub mod fetch;
pub mod image;
pub mod model_pair;
pub mod validator;

pub use self::change_key::ChangeKeyProvider;
pub use self::fetch::{ContentFetcher, HttpFetcher};
pub use self::image::{ImageResolver, ResolvedImage};
pub use self::model_pair::{HttpLoraLookup, LoraLookup, ModelPairResolver};
pub use self::validator::InputValidator;
