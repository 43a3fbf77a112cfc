//! HTML pages for the upload form and its result.

use bucketdrop_core::PublicUrl;
use bucketdrop_shared::AppError;
use handlebars::Handlebars;
use serde::Serialize;

const INDEX: &str = include_str!("../templates/index.hbs");
const NAV: &str = include_str!("../templates/nav.hbs");
const UPLOAD_FORM: &str = include_str!("../templates/uploadform.hbs");
const IMAGE_LIST: &str = include_str!("../templates/imagelist.hbs");

/// Data for the index page.
///
/// The bare form carries neither field; the upload result carries both.
#[derive(Debug, Default, Serialize)]
pub struct PageData {
    /// URL of the object just uploaded.
    pub link: Option<PublicUrl>,
    /// Current listing of the bucket.
    pub images: Vec<PublicUrl>,
}

/// Renders the index page from embedded templates.
pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    /// Register the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns a render error if a template does not parse.
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        for (name, source) in [
            ("nav", NAV),
            ("uploadform", UPLOAD_FORM),
            ("imagelist", IMAGE_LIST),
        ] {
            registry
                .register_partial(name, source)
                .map_err(|e| AppError::Render(e.to_string()))?;
        }
        registry
            .register_template_string("index", INDEX)
            .map_err(|e| AppError::Render(e.to_string()))?;

        Ok(Self { registry })
    }

    /// Render the index page.
    ///
    /// # Errors
    ///
    /// Returns a render error if the template cannot be applied.
    pub fn render(&self, data: &PageData) -> Result<String, AppError> {
        self.registry
            .render("index", data)
            .map_err(|e| AppError::Render(e.to_string()))
    }
}
