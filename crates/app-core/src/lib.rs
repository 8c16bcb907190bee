//! Core domain logic for SkillForge
//!
//! This crate contains the domain records shared by every layer (users,
//! courses, contact messages) and the collaborator services the front-end
//! talks to. Each collaborator is a capability trait with a mock
//! implementation (fixed data, simulated latency) and an HTTP implementation
//! backed by [`client::ServiceClient`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod contact;
pub mod courses;
pub mod user;

pub use auth::{AuthError, Credentials, HttpIdentityService, IdentityService, MockIdentityService};
pub use client::{ServiceClient, ServiceConfig};
pub use contact::{
    ContactError, ContactField, ContactForm, ContactService, FieldErrors, HttpContactService,
    MockContactService,
};
pub use courses::{
    CatalogError, CatalogQuery, CatalogService, CategoryFilter, Course, CourseLevel,
    HttpCatalogService, LevelFilter, MockCatalogService,
};
pub use user::{User, UserRole};
