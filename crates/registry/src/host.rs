/// Associated types of the list widget that drives a [`Dispatcher`](crate::Dispatcher).
///
/// The host is an external collaborator: it sizes the visible range, caches
/// surfaces per view type and decides when to re-resolve. Implementors are
/// usually zero-sized marker types.
pub trait Host: Sized + 'static {
	/// Parent context handed to surface creation.
	type Parent: ?Sized;
	/// Shared surface factory, built once from the first parent seen.
	type Factory;
	/// The reusable presentation unit a handler creates and populates.
	type Surface;
	/// Partial-update token. Opaque to the dispatcher.
	type Hint;

	/// Builds the surface factory from a parent context.
	fn factory(parent: &Self::Parent) -> Self::Factory;
}
