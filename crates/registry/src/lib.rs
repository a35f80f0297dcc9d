//! Type-keyed handler registry and per-position dispatch for list widgets.
//!
//! A host list asks a [`Dispatcher`] three questions per position: how many
//! items there are, which view type an item needs, and how to create and
//! populate a surface for it. Each answer is derived from the item's runtime
//! type (optionally rewritten by a [`FlattenAdapter`]) and the first matching
//! entry of a [`TypeRegistry`].
//!
//! ```ignore
//! let dispatcher = Dispatcher::<MyHost>::new();
//! dispatcher.register_binder(TextBinder)?;
//! dispatcher.set_items(Items::new().with(Text::new("hello")));
//!
//! let index = dispatcher.view_type_for(0)?;
//! let mut surface = dispatcher.create_surface(index, &parent)?;
//! dispatcher.bind_surface(&mut surface, 0, &[])?;
//! ```

/// Registry settings read from config files.
pub mod config;
/// Snapshot-based dispatcher.
pub mod dispatch;
/// Registry and dispatch errors.
pub mod error;
/// Key and value rewriting before lookup.
pub mod flatten;
/// Handler traits and the per-call context.
pub mod handler;
/// Host widget contract.
pub mod host;
/// Type-erased items and item lists.
pub mod item;
/// Runtime type identity.
pub mod key;
/// Duplicate registration policy.
pub mod policy;
/// Ordered key-to-handler table.
pub mod registry;

#[cfg(test)]
mod test_fixtures;

pub use config::RegistryConfig;
pub use dispatch::Dispatcher;
pub use error::{DispatchError, RegistryError};
pub use flatten::{FlattenAdapter, FlattenType, FlattenValue, Identity};
pub use handler::{Handler, HandlerCx, ItemBinder, Typed};
pub use host::Host;
pub use item::{Item, Items};
pub use key::TypeKey;
pub use policy::DuplicatePolicy;
pub use registry::TypeRegistry;
