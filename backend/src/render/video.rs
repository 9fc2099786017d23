//! `<video>` element for a Storefront API video.

use crate::domain::{ImageLoaderOptions, VideoData, VideoError, image_url};

use super::Element;

const VIDEO_CONTROLLED: [&str; 4] = ["id", "playsinline", "controls", "poster"];
const SOURCE_CONTROLLED: [&str; 2] = ["src", "type"];

type Attributes = Vec<(String, Option<String>)>;

/// Inputs to [`video`].
///
/// Caller attributes are applied before the component's own, so `id`,
/// `playsinline`, `controls`, `poster`, `src` and `type` always reflect the
/// props rather than pass-through values.
#[derive(Debug, Clone)]
pub struct VideoProps<'a> {
    data: &'a VideoData,
    preview_image_options: ImageLoaderOptions,
    id: Option<String>,
    plays_inline: bool,
    controls: bool,
    attributes: Attributes,
    source_attributes: Attributes,
}

impl<'a> VideoProps<'a> {
    /// Props for `data` with inline playback and controls enabled.
    #[must_use]
    pub fn new(data: &'a VideoData) -> Self {
        Self {
            data,
            preview_image_options: ImageLoaderOptions::default(),
            id: None,
            plays_inline: true,
            controls: true,
            attributes: Vec::new(),
            source_attributes: Vec::new(),
        }
    }

    /// Sizing applied to the poster image.
    #[must_use]
    pub fn preview_image_options(mut self, options: ImageLoaderOptions) -> Self {
        self.preview_image_options = options;
        self
    }

    /// Element id; defaults to the video's global id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Toggle the `playsinline` attribute.
    #[must_use]
    pub fn plays_inline(mut self, plays_inline: bool) -> Self {
        self.plays_inline = plays_inline;
        self
    }

    /// Toggle the native playback controls.
    #[must_use]
    pub fn controls(mut self, controls: bool) -> Self {
        self.controls = controls;
        self
    }

    /// Pass-through attribute for the `<video>` element.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), Some(value.into())));
        self
    }

    /// Pass-through boolean attribute for the `<video>` element, such as
    /// `muted` or `loop`.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attributes.push((name.into(), None));
        self
    }

    /// Pass-through attribute for every `<source>` element.
    #[must_use]
    pub fn source_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.source_attributes.push((name.into(), Some(value.into())));
        self
    }
}

/// Render a playable `<video>` with one `<source>` per encoding.
///
/// # Errors
/// Returns [`VideoError`] when the sources are missing, empty, incomplete or
/// duplicated. Nothing is rendered in that case.
///
/// # Examples
/// ```
/// use storefront::domain::{VideoData, VideoSource};
/// use storefront::render::{VideoProps, video};
///
/// let data = VideoData {
///     id: Some("hero".into()),
///     preview_image: None,
///     sources: Some(vec![VideoSource::new("https://cdn.example/a.mp4", "video/mp4")]),
/// };
/// let element = video(VideoProps::new(&data)).unwrap();
/// assert_eq!(
///     element.to_html(),
///     r#"<video id="hero" playsinline controls><source src="https://cdn.example/a.mp4" type="video/mp4"></video>"#
/// );
/// ```
pub fn video(props: VideoProps<'_>) -> Result<Element, VideoError> {
    let VideoProps {
        data,
        preview_image_options,
        id,
        plays_inline,
        controls,
        attributes,
        source_attributes,
    } = props;
    let sources = data.validated_sources()?;

    let mut element = Element::new("video").attrs(uncontrolled(attributes, &VIDEO_CONTROLLED));
    if let Some(id) = id.or_else(|| data.id.clone()) {
        element = element.attr("id", id);
    }
    if plays_inline {
        element = element.flag("playsinline");
    }
    if controls {
        element = element.flag("controls");
    }
    let poster = data
        .preview_image_url()
        .map(|url| image_url(url, preview_image_options))
        .filter(|url| !url.is_empty());
    if let Some(poster) = poster {
        element = element.attr("poster", poster);
    }

    let source_attributes = uncontrolled(source_attributes, &SOURCE_CONTROLLED);
    let children = sources.into_iter().map(|source| {
        Element::new("source")
            .attrs(source_attributes.iter().cloned())
            .attr("src", source.url)
            .attr("type", source.mime_type)
            .keyed(source.url)
    });
    Ok(element.children(children))
}

fn uncontrolled(attributes: Attributes, controlled: &[&str]) -> Attributes {
    attributes
        .into_iter()
        .filter(|(name, _)| {
            !controlled
                .iter()
                .any(|reserved| reserved.eq_ignore_ascii_case(name))
        })
        .collect()
}
