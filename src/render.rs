// src/render.rs
use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::WidgetError;
use crate::models::HotelData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    HotelTitle,
    HotelInfo,
    ReviewsTab,
    SocialTab,
    Page,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::HotelTitle,
        TemplateId::HotelInfo,
        TemplateId::ReviewsTab,
        TemplateId::SocialTab,
        TemplateId::Page,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateId::HotelTitle => "hotel-title",
            TemplateId::HotelInfo => "hotel-info",
            TemplateId::ReviewsTab => "reviews-tab",
            TemplateId::SocialTab => "social-tab",
            TemplateId::Page => "page",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            TemplateId::HotelTitle => include_str!("../templates/hotel-title.hbs"),
            TemplateId::HotelInfo => include_str!("../templates/hotel-info.hbs"),
            TemplateId::ReviewsTab => include_str!("../templates/reviews-tab.hbs"),
            TemplateId::SocialTab => include_str!("../templates/social-tab.hbs"),
            TemplateId::Page => include_str!("../templates/page.hbs"),
        }
    }
}

/// Mustache-style templates keyed by [`TemplateId`]. Rendering is a pure
/// function of (template, view model).
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    /// Built-in templates, each optionally replaced by `<dir>/<name>.hbs`.
    pub fn new(override_dir: Option<&Path>) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("fmt_percent", Box::new(fmt_percent_helper));

        for id in TemplateId::ALL {
            let source = match override_dir.map(|d| d.join(format!("{}.hbs", id.name()))) {
                Some(path) if path.exists() => {
                    debug!("Template override - name={}, path={}", id.name(), path.display());
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("reading template {}", path.display()))?
                }
                _ => id.builtin().to_string(),
            };
            handlebars
                .register_template_string(id.name(), source)
                .with_context(|| format!("compiling template '{}'", id.name()))?;
        }

        Ok(Renderer { handlebars })
    }

    pub fn render<T: Serialize>(&self, id: TemplateId, data: &T) -> Result<String, WidgetError> {
        self.handlebars
            .render(id.name(), data)
            .map_err(|e| WidgetError::Template {
                name: id.name(),
                reason: e.to_string(),
            })
    }
}

// Percentages print with one decimal; null (non-finite upstream) prints nothing.
fn fmt_percent_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    if let Some(v) = h.param(0).and_then(|v| v.value().as_f64()) {
        out.write(&format!("{:.1}", v))?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MountPoint {
    HotelTitle,
    HotelInfo,
    ReviewSummary,
    Social,
}

impl MountPoint {
    pub fn id(self) -> &'static str {
        match self {
            MountPoint::HotelTitle => "hotel-title",
            MountPoint::HotelInfo => "hotel-info",
            MountPoint::ReviewSummary => "review-summary",
            MountPoint::Social => "social",
        }
    }
}

/// The page being assembled. Markup is appended to a mount point, never
/// replaced: rendering the same view twice shows it twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    mounts: BTreeMap<MountPoint, String>,
    location_src: Option<String>,
}

impl Page {
    pub fn append(&mut self, mount: MountPoint, markup: &str) {
        self.mounts.entry(mount).or_default().push_str(markup);
    }

    pub fn content(&self, mount: MountPoint) -> &str {
        self.mounts.get(&mount).map(String::as_str).unwrap_or("")
    }

    /// Points the location iframe at `src`; a second call replaces the first.
    pub fn set_location_src(&mut self, src: String) {
        self.location_src = Some(src);
    }

    pub fn location_src(&self) -> Option<&str> {
        self.location_src.as_deref()
    }

    pub fn render_document(&self, renderer: &Renderer, hotel: &HotelData) -> Result<String, WidgetError> {
        let data = json!({
            "hotelName": hotel.name,
            "hotelTitle": self.content(MountPoint::HotelTitle),
            "hotelInfo": self.content(MountPoint::HotelInfo),
            "reviewSummary": self.content(MountPoint::ReviewSummary),
            "social": self.content(MountPoint::Social),
            "locationSrc": self.location_src.as_deref().unwrap_or(""),
        });
        renderer.render(TemplateId::Page, &data)
    }
}
