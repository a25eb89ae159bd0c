//! Vessel Core Runtime
//!
//! Foundational primitives shared by the Vessel page crates:
//!
//! - **Element ids**: stable keys for elements of a page document
//! - **Geometry**: points, sizes and rectangles in page coordinates
//! - **Event Dispatch**: per-element listener registration and removal
//! - **Scopes**: disposal lists that release everything registered during a mount
//!
//! # Example
//!
//! ```rust
//! use vessel_core::Scope;
//!
//! let mut released = Vec::new();
//! let mut scope: Scope<Vec<&'static str>> = Scope::new("demo");
//! scope.defer("first", |log| log.push("first"));
//! scope.defer("second", |log| log.push("second"));
//!
//! // Disposal runs in reverse registration order
//! scope.dispose(&mut released);
//! assert_eq!(released, vec!["second", "first"]);
//! ```

pub mod events;
pub mod geometry;
pub mod scope;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for an element of a page document
    pub struct ElementId;
}

pub use events::{Event, EventData, EventDispatcher, EventHandler, EventType, ListenerId};
pub use geometry::{Point, Rect, Size};
pub use scope::Scope;
