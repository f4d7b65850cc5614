mod category;
mod comment;
mod discussion;
mod order;

pub use category::{CategoryPage, DiscussionCategory};
pub use comment::{CommentPage, DiscussionComment};
pub use discussion::{CategoryName, Discussion, DiscussionPage, MutationIdentity};
pub use order::{DiscussionOrderField, OrderDirection};
