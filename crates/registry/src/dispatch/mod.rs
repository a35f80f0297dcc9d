//! Per-position dispatch for a host list widget.
//!
//! # Mental model
//!
//! * The dispatcher's state is one immutable [`State`]: the current items,
//!   registry and flatten adapter.
//! * Every dispatch call pins one state snapshot and resolves against it from
//!   start to finish, so it never mixes pre- and post-swap values.
//! * Setters build a replacement state and publish it with a CAS loop. A
//!   failed CAS means another writer published first; the update is rebuilt
//!   on the latest state.
//!
//! # Data flow
//!
//! `items[position]` -> flatten -> effective key -> `index_of` -> handler ->
//! surface. `view_type_for` and `bind_surface` both run the full chain;
//! `bind_surface` does not reuse an index computed earlier.
//!
//! # Side effects
//!
//! None beyond handler calls. Swapping items, registry or adapter does not
//! notify anyone; the host re-resolves when it decides to.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use tracing::{debug, trace};

use crate::flatten::{self, FlattenAdapter};
use crate::{
	DispatchError, Handler, HandlerCx, Host, Item, ItemBinder, Items, RegistryConfig,
	RegistryError, TypeKey, TypeRegistry, Typed,
};


/// Published dispatcher state.
pub(crate) struct State<H: Host> {
	pub(crate) items: Option<Arc<Items>>,
	pub(crate) registry: Arc<TypeRegistry<H>>,
	pub(crate) flatten: Option<Arc<dyn FlattenAdapter>>,
}

impl<H: Host> Clone for State<H> {
	fn clone(&self) -> Self {
		Self {
			items: self.items.clone(),
			registry: self.registry.clone(),
			flatten: self.flatten.clone(),
		}
	}
}

impl<H: Host> State<H> {
	#[inline]
	pub(crate) fn item_count(&self) -> usize {
		self.items.as_ref().map_or(0, |items| items.len())
	}

	fn item(&self, position: usize) -> Result<&dyn Item, DispatchError> {
		self.items
			.as_deref()
			.and_then(|items| items.get(position))
			.ok_or(DispatchError::PositionOutOfRange {
				position,
				len: self.item_count(),
			})
	}

	/// Effective key and value of the item at `position`.
	fn flatten(&self, position: usize) -> Result<(TypeKey, &dyn Item), DispatchError> {
		let item = self.item(position)?;
		let adapter = self.flatten.as_deref();
		Ok((
			flatten::flatten_key(adapter, item),
			flatten::flatten_value(adapter, item),
		))
	}
}

/// Routes per-position create and bind calls to registered handlers.
pub struct Dispatcher<H: Host> {
	state: ArcSwap<State<H>>,
	factory: OnceLock<H::Factory>,
}

impl<H: Host> Dispatcher<H> {
	/// Empty dispatcher: no items, empty registry, no adapter.
	pub fn new() -> Self {
		Self::with_registry(TypeRegistry::new())
	}

	pub fn with_registry(registry: TypeRegistry<H>) -> Self {
		Self {
			state: ArcSwap::from_pointee(State {
				items: None,
				registry: Arc::new(registry),
				flatten: None,
			}),
			factory: OnceLock::new(),
		}
	}

	pub fn from_config(config: &RegistryConfig) -> Self {
		Self::with_registry(TypeRegistry::from_config(config))
	}

	/// Number of items, zero when none are set.
	pub fn item_count(&self) -> usize {
		self.state.load().item_count()
	}

	/// View-type index for the item at `position`.
	///
	/// Fails with [`RegistryError::HandlerNotFound`] when no entry matches
	/// the item's effective key.
	pub fn view_type_for(&self, position: usize) -> Result<usize, DispatchError> {
		let state = self.state.load();
		let (key, _) = state.flatten(position)?;
		let index = state.registry.index_of(key)?;
		trace!(position, %key, index, "view type");
		Ok(index)
	}

	/// Creates a surface with the handler at view-type `index`.
	///
	/// The surface factory is built from the first `parent` this dispatcher
	/// sees and reused afterwards.
	pub fn create_surface(
		&self,
		index: usize,
		parent: &H::Parent,
	) -> Result<H::Surface, DispatchError> {
		let state = self.state.load();
		let handler = state
			.registry
			.handler_at(index)
			.ok_or(DispatchError::UnknownViewType {
				index,
				len: state.registry.len(),
			})?;
		let factory = self.factory.get_or_init(|| {
			debug!("surface factory initialized");
			H::factory(parent)
		});
		let cx = HandlerCx::new(self, &state, None);
		trace!(index, handler = handler.name(), "create surface");
		Ok(handler.create(&cx, factory, parent))
	}

	/// Populates `surface` from the item at `position`.
	///
	/// The handler is looked up again from the item's effective key.
	/// `hints` is passed through untouched; empty means a full rebind.
	pub fn bind_surface(
		&self,
		surface: &mut H::Surface,
		position: usize,
		hints: &[H::Hint],
	) -> Result<(), DispatchError> {
		let state = self.state.load();
		let (key, value) = state.flatten(position)?;
		let handler = state.registry.handler_for(key)?;
		let cx = HandlerCx::new(self, &state, Some(position));
		trace!(position, %key, handler = handler.name(), hints = hints.len(), "bind surface");
		handler.bind(&cx, surface, value, hints)
	}

	/// Current items, if any.
	pub fn items(&self) -> Option<Arc<Items>> {
		self.state.load().items.clone()
	}

	/// Replaces the items. Does not trigger any refresh.
	pub fn set_items(&self, items: impl Into<Arc<Items>>) {
		let items = items.into();
		debug!(len = items.len(), "items replaced");
		self.publish(|next| next.items = Some(items.clone()));
	}

	/// Drops the items; `item_count` becomes zero.
	pub fn clear_items(&self) {
		debug!("items cleared");
		self.publish(|next| next.items = None);
	}

	/// Current registry snapshot.
	pub fn registry(&self) -> Arc<TypeRegistry<H>> {
		self.state.load().registry.clone()
	}

	/// Replaces the whole registry.
	pub fn set_registry(&self, registry: TypeRegistry<H>) {
		let registry = Arc::new(registry);
		debug!(entries = registry.len(), "registry replaced");
		self.publish(|next| next.registry = registry.clone());
	}

	pub fn flatten_adapter(&self) -> Option<Arc<dyn FlattenAdapter>> {
		self.state.load().flatten.clone()
	}

	pub fn set_flatten_adapter(&self, adapter: impl FlattenAdapter + 'static) {
		let adapter: Arc<dyn FlattenAdapter> = Arc::new(adapter);
		debug!("flatten adapter replaced");
		self.publish(|next| next.flatten = Some(adapter.clone()));
	}

	/// Restores identity flattening.
	pub fn clear_flatten_adapter(&self) {
		debug!("flatten adapter cleared");
		self.publish(|next| next.flatten = None);
	}

	/// Registers `handler` under `key` in the current registry.
	pub fn register(
		&self,
		key: TypeKey,
		handler: Arc<dyn Handler<H>>,
	) -> Result<usize, RegistryError> {
		self.update_registry(|registry| registry.register(key, handler.clone()))
	}

	/// Registers a typed binder under the key of its value type.
	pub fn register_binder<B: ItemBinder<H>>(&self, binder: B) -> Result<usize, RegistryError> {
		let handler = Typed::shared(binder);
		self.register(TypeKey::of::<B::Value>(), handler)
	}

	/// Imports every entry of `other` after the existing entries.
	pub fn register_all(&self, other: &TypeRegistry<H>) -> Result<(), RegistryError> {
		self.update_registry(|registry| registry.register_all(other))
	}

	/// Index of the first entry registered for `key`.
	pub fn index_of(&self, key: TypeKey) -> Result<usize, RegistryError> {
		self.state.load().registry.index_of(key)
	}

	fn publish(&self, update: impl Fn(&mut State<H>)) {
		loop {
			let cur = self.state.load_full();
			let mut next = (*cur).clone();
			update(&mut next);

			let prev = self.state.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				return;
			}
		}
	}

	fn update_registry<R>(
		&self,
		update: impl Fn(&mut TypeRegistry<H>) -> Result<R, RegistryError>,
	) -> Result<R, RegistryError> {
		loop {
			let cur = self.state.load_full();
			let mut registry = (*cur.registry).clone();
			let out = update(&mut registry)?;

			let next = State {
				registry: Arc::new(registry),
				..(*cur).clone()
			};
			let prev = self.state.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				return Ok(out);
			}
		}
	}
}

impl<H: Host> Default for Dispatcher<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H: Host> std::fmt::Debug for Dispatcher<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.load();
		f.debug_struct("Dispatcher")
			.field("items", &state.item_count())
			.field("registry", &*state.registry)
			.field("flatten", &state.flatten.is_some())
			.field("factory", &self.factory.get().is_some())
			.finish()
	}
}
