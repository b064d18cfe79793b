//! FlakeRank domain types.
//!
//! Pure values shared by the wire layer and the engine: identifiers, stat
//! weights, fractal records, principals and delete-button tokens. No I/O.

pub mod delete_token;
pub mod error;
pub mod fractal;
pub mod ids;
pub mod principals;
pub mod query;
pub mod weights;

pub use delete_token::{DeleteButtonToken, DELETE_CUSTOM_ID};
pub use error::{MalformedTokenError, WeightError};
pub use fractal::{Faction, Fractal};
pub use ids::{ChannelId, InteractionId, MessageId, PrincipalId, SessionId};
pub use principals::{AuthorizedPrincipals, Requester};
pub use query::RankingQuery;
pub use weights::{build_query_url, Proportions, WeightVector};
