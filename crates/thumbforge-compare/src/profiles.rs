//! Option presets exercised for every input file.

use thumbforge_core::ThumbnailOptions;

/// A named set of thumbnail options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    /// Appended to the input stem in output file names.
    pub suffix: &'static str,
    pub options: ThumbnailOptions,
}

impl Profile {
    fn new(name: &'static str, suffix: &'static str, options: ThumbnailOptions) -> Self {
        Self {
            name,
            suffix,
            options,
        }
    }
}

/// Profiles run against raster images.
pub fn image_profiles() -> Vec<Profile> {
    let base = ThumbnailOptions::new().with_quality(85).with_trim(false);
    vec![
        Profile::new("Alma (200x200)", "_alma", base.clone().with_size(200, 200)),
        Profile::new(
            "CollectionBuilder Thumbnail (400x400)",
            "_cb_thumb",
            base.clone().with_size(400, 400),
        ),
        Profile::new(
            "CollectionBuilder Small (800x800)",
            "_cb_small",
            base.clone().with_size(800, 800),
        ),
        Profile::new("With Trim", "_trim", base.with_size(400, 400).with_trim(true)),
    ]
}

/// Profile run against PDF documents.
pub fn pdf_profile() -> Profile {
    Profile::new(
        "PDF (400x400)",
        "_pdf",
        ThumbnailOptions::new().with_size(400, 400).with_quality(85),
    )
}
