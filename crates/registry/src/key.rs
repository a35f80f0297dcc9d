use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Exact-match identifier used to look up a handler.
///
/// Two forms exist:
/// * [`TypeKey::of`] - the runtime identity of a Rust type.
/// * [`TypeKey::tag`] - an explicit string tag chosen by the caller, for
///   flatten adapters that route one Rust type to several handlers.
///
/// Equality is exact. A key for a wrapper type never matches the key of the
/// type it wraps, and a tag never equals a type token even when the strings
/// read the same.
#[derive(Clone, Copy)]
pub struct TypeKey {
	repr: Repr,
}

#[derive(Clone, Copy)]
enum Repr {
	Type { id: TypeId, name: &'static str },
	Tag(&'static str),
}

impl TypeKey {
	/// Key for the concrete type `T`.
	#[inline]
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			repr: Repr::Type {
				id: TypeId::of::<T>(),
				name: type_name::<T>(),
			},
		}
	}

	/// Key for an explicit tag.
	#[inline]
	pub const fn tag(tag: &'static str) -> Self {
		Self { repr: Repr::Tag(tag) }
	}

	/// Human-readable name: the type path or the tag.
	pub fn name(&self) -> &'static str {
		match self.repr {
			Repr::Type { name, .. } => name,
			Repr::Tag(tag) => tag,
		}
	}

	/// Returns true if this key was built from a tag.
	pub fn is_tag(&self) -> bool {
		matches!(self.repr, Repr::Tag(_))
	}

	/// Returns the `TypeId` token for type keys.
	pub fn type_token(&self) -> Option<TypeId> {
		match self.repr {
			Repr::Type { id, .. } => Some(id),
			Repr::Tag(_) => None,
		}
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		match (self.repr, other.repr) {
			(Repr::Type { id: a, .. }, Repr::Type { id: b, .. }) => a == b,
			(Repr::Tag(a), Repr::Tag(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		// Display names stay out of the hash; `type_name` is not unique.
		match self.repr {
			Repr::Type { id, .. } => {
				0u8.hash(state);
				id.hash(state);
			}
			Repr::Tag(tag) => {
				1u8.hash(state);
				tag.hash(state);
			}
		}
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.repr {
			Repr::Type { name, .. } => write!(f, "TypeKey({name})"),
			Repr::Tag(tag) => write!(f, "TypeKey(#{tag})"),
		}
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.repr {
			Repr::Type { name, .. } => f.write_str(name),
			Repr::Tag(tag) => write!(f, "#{tag}"),
		}
	}
}
