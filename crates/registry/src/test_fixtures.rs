//! Host and binders shared by the unit tests.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{Handler, HandlerCx, Host, Item, ItemBinder, Typed};

pub(crate) struct TestHost;

#[derive(Debug)]
pub(crate) struct Factory {
	pub parent: String,
}

#[derive(Debug, Default)]
pub(crate) struct Surface {
	pub label: &'static str,
	pub parent: String,
	pub rendered: Vec<String>,
	pub hints: Vec<&'static str>,
	pub position: Option<usize>,
	pub count_at_bind: usize,
}

impl Host for TestHost {
	type Parent = str;
	type Factory = Factory;
	type Surface = Surface;
	type Hint = &'static str;

	fn factory(parent: &str) -> Factory {
		Factory {
			parent: parent.to_owned(),
		}
	}
}

#[derive(Debug, PartialEq)]
pub(crate) struct Cat(pub &'static str);
#[derive(Debug, PartialEq)]
pub(crate) struct Dog;
#[derive(Debug, PartialEq)]
pub(crate) struct Bird;

/// Binder that renders `label:{value:?}`.
pub(crate) struct Label<T> {
	pub label: &'static str,
	_value: PhantomData<fn() -> T>,
}

pub(crate) fn label<T>(label: &'static str) -> Label<T> {
	Label {
		label,
		_value: PhantomData,
	}
}

pub(crate) fn shared<T: Item + Debug>(name: &'static str) -> Arc<dyn Handler<TestHost>> {
	Typed::shared(label::<T>(name))
}

impl<T: Item + Debug> ItemBinder<TestHost> for Label<T> {
	type Value = T;

	fn create(&self, _cx: &HandlerCx<'_, TestHost>, factory: &Factory, _parent: &str) -> Surface {
		Surface {
			label: self.label,
			parent: factory.parent.clone(),
			..Surface::default()
		}
	}

	fn bind(
		&self,
		cx: &HandlerCx<'_, TestHost>,
		surface: &mut Surface,
		value: &T,
		hints: &[&'static str],
	) {
		surface.rendered.push(format!("{}:{value:?}", self.label));
		surface.hints = hints.to_vec();
		surface.position = cx.position();
		surface.count_at_bind = cx.item_count();
	}
}
