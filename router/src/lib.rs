#![forbid(unsafe_code)]

//! # Waymark Router
//!
//! The framework-agnostic routing core for the Waymark UI toolkit: it
//! matches a current location against route patterns, extracts parameters,
//! resolves nested and relative routes, and answers active-link queries.
//! Rendering and browser wiring live with the host framework, which drives
//! this crate through three surfaces:
//!
//! - [`Matcher`] / [`match_path`] compile a pattern such as
//!   `/users/:id/posts/:post_id?` or `/files/*` and test pathnames against
//!   it, yielding a [`PathMatch`] with the consumed prefix and captured
//!   params.
//! - [`RouteSet`] picks the first matching definition out of an ordered
//!   list, the way a route outlet decides what to render.
//! - [`is_path_active`] / [`is_query_active`] decide whether a link target
//!   should be highlighted for the current location.
//!
//! The current location itself comes from an injected [`History`];
//! [`MemoryHistory`] is the in-process implementation used in tests and on
//! the server.
//!
//! ```
//! use waymark_router::{match_path, MatchOptions};
//!
//! let m = match_path("/users/:id", "/users/42", &MatchOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(m.params.get_str("id"), Some("42"));
//! assert!(m.is_exact);
//! ```

pub mod active;
pub mod history;
pub mod location;
mod matching;
pub mod params;
mod route_set;

pub use active::{
    is_path_active, is_path_active_in, is_query_active, ActiveRoute,
};
pub use history::{History, HistoryListener, ListenerId, MemoryHistory};
pub use location::{Location, LocationChange, Url};
pub use matching::*;
pub use params::{IntoParam, Params, ParamsError, ParamsMap};
pub use route_set::{RouteDef, RouteSet};
