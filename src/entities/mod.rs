//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables of the fundraising domain.
//! Records reference each other through plain string ids; no foreign-key
//! constraints or cascades are declared, so deletes never ripple.

pub mod cause;
pub mod cause_buyer;
pub mod cause_runner;
pub mod challenge;
pub mod comment;
pub mod post;
pub mod sponsor_cause;
pub mod sponsor_challenge;
pub mod user;

pub use cause::{Activity, Column as CauseColumn, Entity as Cause, Model as CauseModel};
pub use cause_buyer::{
    Column as CauseBuyerColumn, Entity as CauseBuyer, Model as CauseBuyerModel,
};
pub use cause_runner::{
    Column as CauseRunnerColumn, Entity as CauseRunner, Model as CauseRunnerModel,
};
pub use challenge::{
    ChallengeMode, Column as ChallengeColumn, Entity as Challenge, Model as ChallengeModel,
};
pub use comment::{Column as CommentColumn, Entity as Comment, Model as CommentModel};
pub use post::{Column as PostColumn, Entity as Post, Model as PostModel};
pub use sponsor_cause::{
    Column as SponsorCauseColumn, Entity as SponsorCause, Model as SponsorCauseModel,
};
pub use sponsor_challenge::{
    Column as SponsorChallengeColumn, Entity as SponsorChallenge,
    Model as SponsorChallengeModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
