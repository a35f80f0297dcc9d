//! Handler contracts.
//!
//! [`Handler`] is the object-safe unit stored in a [`TypeRegistry`]. Most
//! handlers are written as an [`ItemBinder`], which sees its value already
//! downcast, and registered through [`Typed`].

use std::any::type_name;
use std::sync::Arc;

use crate::dispatch::State;
use crate::{DispatchError, Dispatcher, Host, Item, TypeKey, TypeRegistry};

/// Context passed into every handler call.
///
/// Replaces a stored back-reference to the owning dispatcher. All reads go
/// through the snapshot the current call resolved against, so a handler sees
/// the same items and registry the dispatcher used to pick it.
pub struct HandlerCx<'a, H: Host> {
	dispatcher: &'a Dispatcher<H>,
	state: &'a State<H>,
	position: Option<usize>,
}

impl<'a, H: Host> HandlerCx<'a, H> {
	pub(crate) fn new(
		dispatcher: &'a Dispatcher<H>,
		state: &'a State<H>,
		position: Option<usize>,
	) -> Self {
		Self {
			dispatcher,
			state,
			position,
		}
	}

	/// The dispatcher that invoked this handler.
	#[inline]
	pub fn dispatcher(&self) -> &'a Dispatcher<H> {
		self.dispatcher
	}

	/// Position being bound. `None` during surface creation.
	#[inline]
	pub fn position(&self) -> Option<usize> {
		self.position
	}

	/// Item count of the snapshot in use.
	pub fn item_count(&self) -> usize {
		self.state.item_count()
	}

	/// Item at `position` in the snapshot in use.
	pub fn item(&self, position: usize) -> Option<&'a dyn Item> {
		self.state.items.as_deref()?.get(position)
	}

	/// Registry of the snapshot in use.
	pub fn registry(&self) -> &'a TypeRegistry<H> {
		&self.state.registry
	}
}

/// Creates and populates surfaces for one registered key.
pub trait Handler<H: Host>: Send + Sync {
	/// Materializes a new, empty surface.
	fn create(
		&self,
		cx: &HandlerCx<'_, H>,
		factory: &H::Factory,
		parent: &H::Parent,
	) -> H::Surface;

	/// Populates `surface` from the effective value of an item.
	///
	/// An empty `hints` slice means a full rebind.
	fn bind(
		&self,
		cx: &HandlerCx<'_, H>,
		surface: &mut H::Surface,
		value: &dyn Item,
		hints: &[H::Hint],
	) -> Result<(), DispatchError>;

	/// Name used in logs.
	fn name(&self) -> &'static str {
		type_name::<Self>()
	}
}

/// Statically typed handler for values of type [`ItemBinder::Value`].
pub trait ItemBinder<H: Host>: Send + Sync + 'static {
	type Value: Item;

	fn create(
		&self,
		cx: &HandlerCx<'_, H>,
		factory: &H::Factory,
		parent: &H::Parent,
	) -> H::Surface;

	fn bind(
		&self,
		cx: &HandlerCx<'_, H>,
		surface: &mut H::Surface,
		value: &Self::Value,
		hints: &[H::Hint],
	);
}

/// Adapts an [`ItemBinder`] into a [`Handler`].
///
/// Binding fails with [`DispatchError::ValueMismatch`] when the effective
/// value is not a `B::Value`, which only happens when a flatten adapter
/// reports a key that does not describe the value it returns.
#[derive(Debug, Clone, Default)]
pub struct Typed<B>(pub B);

impl<B> Typed<B> {
	/// Shares the adapted binder as a registry handler.
	pub fn shared<H: Host>(binder: B) -> Arc<dyn Handler<H>>
	where
		B: ItemBinder<H>,
	{
		Arc::new(Self(binder))
	}
}

impl<H: Host, B: ItemBinder<H>> Handler<H> for Typed<B> {
	fn create(
		&self,
		cx: &HandlerCx<'_, H>,
		factory: &H::Factory,
		parent: &H::Parent,
	) -> H::Surface {
		self.0.create(cx, factory, parent)
	}

	fn bind(
		&self,
		cx: &HandlerCx<'_, H>,
		surface: &mut H::Surface,
		value: &dyn Item,
		hints: &[H::Hint],
	) -> Result<(), DispatchError> {
		let Some(value) = value.downcast_ref::<B::Value>() else {
			return Err(DispatchError::ValueMismatch {
				expected: TypeKey::of::<B::Value>(),
				found: value.type_key(),
			});
		};
		self.0.bind(cx, surface, value, hints);
		Ok(())
	}

	fn name(&self) -> &'static str {
		type_name::<B>()
	}
}
