//! Concrete calculators.

pub mod post_length;
pub mod posts_per_user;
pub mod total_posts;

pub use post_length::{AveragePostLength, LengthSum, MaxPostLength};
pub use posts_per_user::{AveragePostsPerUser, PostsPerUserState};
pub use total_posts::TotalPosts;
