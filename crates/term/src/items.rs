//! Item types shown by the demo list.

use std::sync::Arc;

use rowkit_registry::{Item, Items};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
	pub text: String,
}

/// An image, identified by its resource name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
	pub resource: String,
}

/// Text captioning an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichItem {
	pub text: String,
	pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
	Text(TextItem),
	Image(ImageItem),
	Rich(RichItem),
}

/// Wrapper routed by its content when the list is flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
	pub content: PostContent,
}

impl Post {
	pub fn new(content: impl Into<PostContent>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl From<TextItem> for PostContent {
	fn from(item: TextItem) -> Self {
		Self::Text(item)
	}
}

impl From<ImageItem> for PostContent {
	fn from(item: ImageItem) -> Self {
		Self::Image(item)
	}
}

impl From<RichItem> for PostContent {
	fn from(item: RichItem) -> Self {
		Self::Rich(item)
	}
}

/// Flatten function exposing a post's content; other items pass through.
pub fn post_content(item: &dyn Item) -> &dyn Item {
	match item.downcast_ref::<Post>().map(|post| &post.content) {
		Some(PostContent::Text(text)) => text,
		Some(PostContent::Image(image)) => image,
		Some(PostContent::Rich(rich)) => rich,
		None => item,
	}
}

/// Largest accepted `repeat` for [`sample`].
pub const MAX_REPEAT: usize = 100_000;

/// The demo list: a text, an image and a rich item, `repeat` times.
///
/// Repeats share one allocation per item. With `wrap` every entry is a
/// [`Post`] instead of the bare item. Returns `None` when `repeat` exceeds
/// [`MAX_REPEAT`].
pub fn sample(repeat: usize, wrap: bool) -> Option<Items> {
	if repeat > MAX_REPEAT {
		return None;
	}

	let text = TextItem {
		text: "world".to_owned(),
	};
	let image = ImageItem {
		resource: "ic_launcher".to_owned(),
	};
	let rich = RichItem {
		text: "hello from a rich row".to_owned(),
		resource: "img_11".to_owned(),
	};

	let triple: [Arc<dyn Item>; 3] = if wrap {
		[
			Arc::new(Post::new(text)),
			Arc::new(Post::new(image)),
			Arc::new(Post::new(rich)),
		]
	} else {
		[Arc::new(text), Arc::new(image), Arc::new(rich)]
	};

	let mut items = Items::with_capacity(repeat * triple.len());
	for _ in 0..repeat {
		for item in &triple {
			items.push_shared(item.clone());
		}
	}
	Some(items)
}

#[cfg(test)]
mod tests {
	use rowkit_registry::TypeKey;

	use super::*;

	#[test]
	fn sample_repeats_the_triple() {
		let items = sample(2, false).unwrap();
		let keys: Vec<TypeKey> = items.iter().map(|item| item.type_key()).collect();
		assert_eq!(
			keys,
			[
				TypeKey::of::<TextItem>(),
				TypeKey::of::<ImageItem>(),
				TypeKey::of::<RichItem>(),
				TypeKey::of::<TextItem>(),
				TypeKey::of::<ImageItem>(),
				TypeKey::of::<RichItem>(),
			]
		);
		assert!(sample(0, false).unwrap().is_empty());
	}

	#[test]
	fn oversized_repeat_is_refused() {
		assert_eq!(sample(MAX_REPEAT, false).map(|items| items.len()), Some(MAX_REPEAT * 3));
		assert!(sample(MAX_REPEAT + 1, false).is_none());
		assert!(sample(usize::MAX / 2, true).is_none());
	}

	#[test]
	fn wrapped_sample_holds_posts() {
		let items = sample(1, true).unwrap();
		assert_eq!(items.len(), 3);
		assert!(items.iter().all(|item| item.is::<Post>()));
	}

	#[test]
	fn post_content_unwraps_posts_only() {
		let post = Post::new(ImageItem {
			resource: "cat".to_owned(),
		});
		let inner = post_content(&post);
		assert_eq!(inner.type_key(), TypeKey::of::<ImageItem>());
		assert_eq!(
			inner.downcast_ref::<ImageItem>().map(|image| image.resource.as_str()),
			Some("cat")
		);

		let text = TextItem {
			text: "plain".to_owned(),
		};
		assert!(post_content(&text).is::<TextItem>());
	}
}
