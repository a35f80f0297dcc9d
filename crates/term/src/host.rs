//! Terminal list host.
//!
//! Plays the part of the list widget: it asks the dispatcher for the item
//! count, resolves each position to a view type, keeps one pooled row per
//! view type and prints every bound row in order.

use std::io::{self, Write};

use rowkit_registry::{
	DispatchError, Dispatcher, FlattenValue, HandlerCx, Host, ItemBinder, RegistryError,
};
use rustc_hash::FxHashMap as HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::FileConfig;
use crate::items::{self, ImageItem, RichItem, TextItem};

/// Marker type naming the terminal host's associated types.
pub struct TermHost;

/// Parent context for row creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListView {
	pub width: usize,
}

/// Shared row factory state, derived from the first [`ListView`] seen.
#[derive(Debug, Clone, Copy)]
pub struct RowStyle {
	width: usize,
}

/// A pooled, reusable row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
	pub kind: &'static str,
	pub lines: Vec<String>,
	width: usize,
	/// Number of times this row has been bound.
	pub binds: usize,
}

impl Row {
	fn new(kind: &'static str, style: &RowStyle) -> Self {
		Self {
			kind,
			width: style.width,
			..Self::default()
		}
	}

	/// Appends `text` clipped to the row width.
	fn line(&mut self, text: &str) {
		self.lines.push(text.chars().take(self.width).collect());
	}
}

/// Partial-update hints understood by the row binders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHint {
	/// Only the caption of a rich row changed.
	Caption,
}

impl Host for TermHost {
	type Parent = ListView;
	type Factory = RowStyle;
	type Surface = Row;
	type Hint = RowHint;

	fn factory(parent: &ListView) -> RowStyle {
		RowStyle {
			width: parent.width,
		}
	}
}

pub struct TextBinder;

impl ItemBinder<TermHost> for TextBinder {
	type Value = TextItem;

	fn create(&self, _cx: &HandlerCx<'_, TermHost>, style: &RowStyle, _parent: &ListView) -> Row {
		Row::new("text", style)
	}

	fn bind(
		&self,
		_cx: &HandlerCx<'_, TermHost>,
		row: &mut Row,
		item: &TextItem,
		_hints: &[RowHint],
	) {
		row.lines.clear();
		row.line(&item.text);
		row.binds += 1;
	}
}

pub struct ImageBinder;

impl ItemBinder<TermHost> for ImageBinder {
	type Value = ImageItem;

	fn create(&self, _cx: &HandlerCx<'_, TermHost>, style: &RowStyle, _parent: &ListView) -> Row {
		Row::new("image", style)
	}

	fn bind(
		&self,
		_cx: &HandlerCx<'_, TermHost>,
		row: &mut Row,
		item: &ImageItem,
		_hints: &[RowHint],
	) {
		row.lines.clear();
		row.line(&format!("[image: {}]", item.resource));
		row.binds += 1;
	}
}

/// Two-line row: the image, then its caption.
pub struct RichBinder;

impl ItemBinder<TermHost> for RichBinder {
	type Value = RichItem;

	fn create(&self, _cx: &HandlerCx<'_, TermHost>, style: &RowStyle, _parent: &ListView) -> Row {
		Row::new("rich", style)
	}

	fn bind(
		&self,
		_cx: &HandlerCx<'_, TermHost>,
		row: &mut Row,
		item: &RichItem,
		hints: &[RowHint],
	) {
		if hints.contains(&RowHint::Caption) && row.lines.len() == 2 {
			row.lines.truncate(1);
		} else {
			row.lines.clear();
			row.line(&format!("[image: {}]", item.resource));
		}
		row.line(&item.text);
		row.binds += 1;
	}
}

/// Builds a dispatcher holding the demo list described by `config`.
pub fn dispatcher(config: &FileConfig) -> Result<Dispatcher<TermHost>, HostError> {
	let dispatcher = Dispatcher::from_config(&config.registry);
	dispatcher.register_binder(TextBinder)?;
	dispatcher.register_binder(ImageBinder)?;
	dispatcher.register_binder(RichBinder)?;

	let list = &config.list;
	if list.flatten {
		dispatcher.set_flatten_adapter(FlattenValue::new(items::post_content));
	}
	let items = items::sample(list.repeat, list.flatten).ok_or(HostError::ListTooLong {
		repeat: list.repeat,
		max: items::MAX_REPEAT,
	})?;
	dispatcher.set_items(items);
	Ok(dispatcher)
}

/// Errors raised while drawing the list.
#[derive(Debug, Error)]
pub enum HostError {
	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error(transparent)]
	Dispatch(#[from] DispatchError),

	#[error("list repeat {repeat} exceeds the maximum of {max}")]
	ListTooLong { repeat: usize, max: usize },

	#[error("failed to write row {position}: {error}")]
	Write { position: usize, error: io::Error },
}

/// Summary of one [`TermList::render`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
	pub rows: usize,
	pub surfaces: usize,
}

/// The visible list: a dispatcher plus the per-view-type row pool.
pub struct TermList {
	dispatcher: Dispatcher<TermHost>,
	view: ListView,
	pool: HashMap<usize, Row>,
}

impl TermList {
	pub fn new(dispatcher: Dispatcher<TermHost>, view: ListView) -> Self {
		Self {
			dispatcher,
			view,
			pool: HashMap::default(),
		}
	}

	pub fn from_config(config: &FileConfig) -> Result<Self, HostError> {
		let view = ListView {
			width: config.list.width,
		};
		Ok(Self::new(dispatcher(config)?, view))
	}

	pub fn dispatcher(&self) -> &Dispatcher<TermHost> {
		&self.dispatcher
	}

	/// Pooled row for view type `index`, if one was created.
	pub fn pooled(&self, index: usize) -> Option<&Row> {
		self.pool.get(&index)
	}

	/// Binds every position in order and writes its lines to `out`.
	///
	/// Stops at the first position whose item has no handler.
	pub fn render(&mut self, out: &mut impl Write) -> Result<RenderStats, HostError> {
		let count = self.dispatcher.item_count();
		let mut created = 0;

		for position in 0..count {
			let index = self.dispatcher.view_type_for(position)?;
			let row = match self.pool.entry(index) {
				std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
				std::collections::hash_map::Entry::Vacant(entry) => {
					let row = self.dispatcher.create_surface(index, &self.view)?;
					debug!(index, kind = row.kind, "row created");
					created += 1;
					entry.insert(row)
				}
			};
			self.dispatcher.bind_surface(row, position, &[])?;

			for line in &row.lines {
				writeln!(out, "{position:>4} {:<5} {line}", row.kind)
					.map_err(|error| HostError::Write { position, error })?;
			}
		}

		info!(rows = count, created, pooled = self.pool.len(), "list rendered");
		Ok(RenderStats {
			rows: count,
			surfaces: created,
		})
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rowkit_registry::{DuplicatePolicy, Items, TypeKey};
	use rstest::rstest;

	use super::*;
	use crate::config::ListConfig;
	use crate::items::Post;

	fn config(repeat: usize, width: usize, flatten: bool) -> FileConfig {
		FileConfig {
			list: ListConfig {
				repeat,
				width,
				flatten,
			},
			..FileConfig::default()
		}
	}

	fn render_to_string(list: &mut TermList) -> (String, RenderStats) {
		let mut out = Vec::new();
		let stats = list.render(&mut out).unwrap();
		(String::from_utf8(out).unwrap(), stats)
	}

	const TWO_TRIPLES: &str = concat!(
		"   0 text  world\n",
		"   1 image [image: ic_launcher]\n",
		"   2 rich  [image: img_11]\n",
		"   2 rich  hello from a rich row\n",
		"   3 text  world\n",
		"   4 image [image: ic_launcher]\n",
		"   5 rich  [image: img_11]\n",
		"   5 rich  hello from a rich row\n",
	);

	#[rstest]
	#[case::bare(false)]
	#[case::flattened(true)]
	fn renders_the_sample(#[case] flatten: bool) {
		let mut list = TermList::from_config(&config(2, 40, flatten)).unwrap();
		let (text, stats) = render_to_string(&mut list);

		assert_eq!(text, TWO_TRIPLES);
		assert_eq!(stats, RenderStats { rows: 6, surfaces: 3 });
	}

	#[test]
	fn rows_are_pooled_per_view_type() {
		let mut list = TermList::from_config(&config(4, 40, false)).unwrap();
		render_to_string(&mut list);

		let text_index = list.dispatcher().index_of(TypeKey::of::<TextItem>()).unwrap();
		assert_eq!(list.pooled(text_index).map(|row| row.binds), Some(4));
		assert_eq!(list.pooled(3), None);
	}

	#[test]
	fn lines_are_clipped_to_width() {
		let mut list = TermList::from_config(&config(1, 8, false)).unwrap();
		let (text, _) = render_to_string(&mut list);
		assert_eq!(
			text,
			"   0 text  world\n   1 image [image: \n   2 rich  [image: \n   2 rich  hello fr\n"
		);
	}

	#[test]
	fn empty_list_renders_nothing() {
		let mut list = TermList::from_config(&config(0, 40, false)).unwrap();
		let (text, stats) = render_to_string(&mut list);
		assert_eq!(text, "");
		assert_eq!(stats, RenderStats { rows: 0, surfaces: 0 });
	}

	#[test]
	fn oversized_file_repeat_is_an_error() {
		let config = FileConfig::parse("[list]\nrepeat = 100001").unwrap();
		assert!(matches!(
			TermList::from_config(&config),
			Err(HostError::ListTooLong {
				repeat: 100_001,
				max: items::MAX_REPEAT,
			})
		));
	}

	#[test]
	fn unflattened_posts_have_no_handler() {
		let dispatcher = dispatcher(&config(0, 40, false)).unwrap();
		dispatcher.set_items(Items::new().with(Post::new(TextItem {
			text: "hidden".to_owned(),
		})));
		let mut list = TermList::new(dispatcher, ListView { width: 40 });

		let err = list.render(&mut Vec::new()).unwrap_err();
		match err {
			HostError::Dispatch(err) => assert_eq!(err.missing_key(), Some(TypeKey::of::<Post>())),
			other => panic!("expected dispatch error, got {other:?}"),
		}
	}

	#[test]
	fn strict_registry_accepts_distinct_binders() {
		let mut config = config(1, 40, false);
		config.registry.duplicate_policy = DuplicatePolicy::Reject;
		let dispatcher = dispatcher(&config).unwrap();
		assert_eq!(dispatcher.registry().len(), 3);
		assert!(matches!(
			dispatcher.register_binder(TextBinder),
			Err(RegistryError::DuplicateType { existing: 0, .. })
		));
	}

	#[test]
	fn caption_hint_rebinds_only_the_caption() {
		let dispatcher = dispatcher(&config(1, 40, false)).unwrap();
		let view = ListView { width: 40 };
		let index = dispatcher.view_type_for(2).unwrap();
		let mut row = dispatcher.create_surface(index, &view).unwrap();
		dispatcher.bind_surface(&mut row, 2, &[]).unwrap();

		let filler = TextItem {
			text: "t".to_owned(),
		};
		dispatcher.set_items(Items::new().with(filler.clone()).with(filler).with(RichItem {
			text: "new caption".to_owned(),
			resource: "other".to_owned(),
		}));
		dispatcher.bind_surface(&mut row, 2, &[RowHint::Caption]).unwrap();

		assert_eq!(row.lines, vec!["[image: img_11]".to_owned(), "new caption".to_owned()]);
		assert_eq!(row.binds, 2);
	}
}
