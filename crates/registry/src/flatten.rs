//! Flattening: mapping an item to the effective key and value used for
//! dispatch.
//!
//! With no adapter installed the effective key is the item's runtime type and
//! the effective value is the item itself. An adapter can funnel several
//! concrete types into one key, or route one wrapper type to different
//! handlers depending on what it wraps.

use crate::{Item, TypeKey};

/// Strategy deriving the effective `(key, value)` of an item.
///
/// Both methods must be pure; they are called once per item per dispatch.
pub trait FlattenAdapter: Send + Sync {
	/// Key used for handler lookup.
	fn flatten_type(&self, item: &dyn Item) -> TypeKey;

	/// Value handed to the handler. Defaults to the item itself.
	fn flatten_value<'a>(&self, item: &'a dyn Item) -> &'a dyn Item {
		item
	}
}

/// Adapter reproducing the no-adapter behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl FlattenAdapter for Identity {
	#[inline]
	fn flatten_type(&self, item: &dyn Item) -> TypeKey {
		item.type_key()
	}
}

/// Overrides the effective key only; the value passes through unchanged.
pub struct FlattenType<F> {
	key_of: F,
}

impl<F> FlattenType<F>
where
	F: Fn(&dyn Item) -> TypeKey + Send + Sync,
{
	pub fn new(key_of: F) -> Self {
		Self { key_of }
	}
}

impl<F> FlattenAdapter for FlattenType<F>
where
	F: Fn(&dyn Item) -> TypeKey + Send + Sync,
{
	fn flatten_type(&self, item: &dyn Item) -> TypeKey {
		(self.key_of)(item)
	}
}

/// Overrides the effective value only; the effective key is the runtime type
/// of the flattened value.
#[derive(Clone, Copy)]
pub struct FlattenValue {
	value_of: fn(&dyn Item) -> &dyn Item,
}

impl FlattenValue {
	pub fn new(value_of: fn(&dyn Item) -> &dyn Item) -> Self {
		Self { value_of }
	}
}

impl FlattenAdapter for FlattenValue {
	fn flatten_type(&self, item: &dyn Item) -> TypeKey {
		(self.value_of)(item).type_key()
	}

	fn flatten_value<'a>(&self, item: &'a dyn Item) -> &'a dyn Item {
		(self.value_of)(item)
	}
}

/// Effective key of `item` under an optional adapter.
#[inline]
pub fn flatten_key(adapter: Option<&dyn FlattenAdapter>, item: &dyn Item) -> TypeKey {
	match adapter {
		Some(adapter) => adapter.flatten_type(item),
		None => item.type_key(),
	}
}

/// Effective value of `item` under an optional adapter.
#[inline]
pub fn flatten_value<'a>(adapter: Option<&dyn FlattenAdapter>, item: &'a dyn Item) -> &'a dyn Item {
	match adapter {
		Some(adapter) => adapter.flatten_value(item),
		None => item,
	}
}
