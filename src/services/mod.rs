pub mod moderation;

pub mod confession_service;
pub mod confession_service_impl;
pub use confession_service::{
    ConfessionError, ConfessionPage, ConfessionService, ConfessionSubmission,
};
pub use confession_service_impl::SeaOrmConfessionService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, Registration, TokenClaims};
pub use auth_service_impl::SeaOrmAuthService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserAdminError, UserAdminService, UserPage};
pub use user_service_impl::SeaOrmUserAdminService;

pub mod bad_word_service;
pub mod bad_word_service_impl;
pub use bad_word_service::{BadWordError, BadWordService};
pub use bad_word_service_impl::SeaOrmBadWordService;
