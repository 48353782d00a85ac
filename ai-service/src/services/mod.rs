pub mod analysis;
pub mod metrics;
pub mod providers;
pub mod recommender;

pub use self::analysis::TaskAnalyzer;
pub use self::metrics::{get_metrics, init_metrics};
pub use self::recommender::{AssigneeRecommender, RandomSource, ThreadRngSource};
