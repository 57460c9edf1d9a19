//! Platform support model for apicat.
//!
//! Operating-system support for an API is expressed as a set of facts
//! ("supported on iOS from 13.0", "unsupported on tvOS"). This crate turns
//! those facts into canonical per-platform timelines and into the
//! allow-list / deny-list annotation shown to users.
//!
//! # Key Types
//!
//! - [`PlatformSupportRange`] / [`VersionPoint`] -- Canonical support timeline for one platform
//! - [`PlatformFact`] / [`PlatformImplications`] -- Raw support facts and implied platforms
//! - [`PlatformAnnotation`] -- Allow-list / deny-list summary over all platforms

pub mod annotation;
pub mod error;
pub mod fact;
pub mod names;
pub mod range;

pub use annotation::{PlatformAnnotation, PlatformAnnotationKind, PlatformSupport};
pub use error::{PlatformError, PlatformResult};
pub use fact::{PlatformFact, PlatformImplication, PlatformImplications};
pub use names::display_name;
pub use range::{PlatformSupportRange, SupportSpan, VersionPoint};
