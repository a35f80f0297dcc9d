//! Heterogeneous list items.

use std::any::{Any, type_name};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::TypeKey;

/// A value that can sit in an [`Items`] list.
///
/// Implemented for every `'static + Send + Sync` type. Call the methods on a
/// `&dyn Item` (e.g. `&*arc`), not on the `Arc` itself, or the `Arc` type is
/// what gets reported.
pub trait Item: Any + Send + Sync {
	/// Key of the concrete runtime type.
	fn type_key(&self) -> TypeKey;

	/// Name of the concrete runtime type.
	fn type_name(&self) -> &'static str;

	fn as_any(&self) -> &(dyn Any + 'static);
}

impl<T: Any + Send + Sync> Item for T {
	#[inline]
	fn type_key(&self) -> TypeKey {
		TypeKey::of::<T>()
	}

	#[inline]
	fn type_name(&self) -> &'static str {
		type_name::<T>()
	}

	#[inline]
	fn as_any(&self) -> &(dyn Any + 'static) {
		self
	}
}

impl<'a> dyn Item + 'a {
	/// Returns true if the concrete type is `T`.
	#[inline]
	pub fn is<T: Item>(&self) -> bool {
		self.as_any().is::<T>()
	}

	/// Downcasts to the concrete type `T`.
	#[inline]
	pub fn downcast_ref<T: Item>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}
}

impl fmt::Debug for dyn Item + '_ {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Item({})", self.type_name())
	}
}

/// Ordered, possibly heterogeneous item list.
///
/// The dispatcher never edits a list in place; callers build a new one and
/// hand it over with [`Dispatcher::set_items`](crate::Dispatcher::set_items).
#[derive(Clone, Default)]
pub struct Items {
	inner: Vec<Arc<dyn Item>>,
}

impl Items {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			inner: Vec::with_capacity(capacity),
		}
	}

	/// Appends an item.
	pub fn push<T: Item>(&mut self, item: T) {
		self.inner.push(Arc::new(item));
	}

	/// Appends an already shared item.
	pub fn push_shared(&mut self, item: Arc<dyn Item>) {
		self.inner.push(item);
	}

	/// Builder form of [`Items::push`].
	pub fn with<T: Item>(mut self, item: T) -> Self {
		self.push(item);
		self
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	#[inline]
	pub fn get(&self, position: usize) -> Option<&dyn Item> {
		self.inner.get(position).map(|item| &**item)
	}

	pub fn iter(&self) -> impl Iterator<Item = &dyn Item> + '_ {
		self.inner.iter().map(|item| &**item)
	}
}

impl Index<usize> for Items {
	type Output = dyn Item;

	fn index(&self, position: usize) -> &Self::Output {
		&*self.inner[position]
	}
}

impl FromIterator<Arc<dyn Item>> for Items {
	fn from_iter<I: IntoIterator<Item = Arc<dyn Item>>>(iter: I) -> Self {
		Self {
			inner: iter.into_iter().collect(),
		}
	}
}

impl From<Vec<Arc<dyn Item>>> for Items {
	fn from(inner: Vec<Arc<dyn Item>>) -> Self {
		Self { inner }
	}
}

impl fmt::Debug for Items {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}
