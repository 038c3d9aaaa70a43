//! Entity data-access modules.
//!
//! One module per entity. Each owns its entity's update [`FieldMap`] and
//! search [`FilterSpec`], splices builder fragments into full statements,
//! and executes them through a [`GenericClient`].
//!
//! [`FieldMap`]: crate::FieldMap
//! [`FilterSpec`]: crate::FilterSpec
//! [`GenericClient`]: crate::GenericClient

pub mod company;
pub mod job;
pub mod user;

pub use company::{Company, NewCompany};
pub use job::{Job, NewJob};
pub use user::User;
