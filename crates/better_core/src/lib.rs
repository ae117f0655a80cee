//! better Core Runtime
//!
//! Foundational, rendering-agnostic primitives shared by every widget:
//!
//! - **Events**: keyboard/pointer events and the document listener registry
//! - **Node Tree**: the containment hierarchy used for hit and outside tests
//! - **Timers**: cancelable deadlines, debouncing and keyed timer queues
//! - **Bindings**: controlled/uncontrolled value resolution
//! - **Stores**: keyed shared state for widgets that coordinate
//! - **Storage**: optional local-storage style mirroring of values
//!
//! Time is never read from a clock inside this crate. Every time-dependent
//! operation takes `now` in milliseconds, supplied by the host event loop.
//!
//! # Example
//!
//! ```rust
//! use better_core::binding::ValueBinding;
//!
//! let mut binding = ValueBinding::uncontrolled(None::<u32>);
//! assert!(binding.write(Some(3)));
//! assert_eq!(binding.get(), Some(&3));
//!
//! // Once a value is supplied externally, internal writes are ignored
//! binding.set_external(Some(7));
//! assert!(!binding.write(Some(4)));
//! assert_eq!(binding.get(), Some(&7));
//! ```

pub mod binding;
pub mod events;
pub mod key;
pub mod storage;
pub mod store;
pub mod timer;
pub mod tree;

pub use binding::ValueBinding;
pub use events::{
    EventDispatcher, KeyCode, KeyEvent, ListenerId, ListenerKind, Modifiers, PointerEvent,
};
pub use key::InstanceKey;
pub use storage::{MemoryStorage, Mirrored, StorageBackend, StorageError};
pub use store::{Store, SubscriptionHandle};
pub use timer::{Debouncer, Timer, TimerId, TimerQueue, DEFAULT_DEBOUNCE_MS};
pub use tree::{NodeId, NodeTree};
