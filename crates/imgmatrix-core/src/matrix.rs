use crate::config::MatrixConfig;

/// A version + variant combination; one Dockerfile each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalImage {
    /// PHP runtime version the Dockerfile is built from.
    pub version: String,
    /// `version`, or `version-variant` for a non-empty variant.
    pub name: String,
}

/// One built artifact: a canonical image built up to a given target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedImage {
    /// Canonical image name, also the `data/` directory.
    pub base: String,
    /// Dockerfile stage the image is built up to.
    pub target: String,
    /// Published name: `base`, suffixed with `-target` unless it is the default target.
    pub name: String,
}

/// Canonical and extended image names for a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatrix {
    /// Variant-major: for each variant, every version.
    pub images: Vec<CanonicalImage>,
    /// Target-major: for each target, every canonical image.
    pub extended: Vec<ExtendedImage>,
}

impl ImageMatrix {
    pub fn from_config(config: &MatrixConfig) -> Self {
        build_matrix(
            &config.matrix.versions,
            &config.matrix.variants,
            &config.matrix.targets,
            &config.matrix.default_target,
        )
    }

    /// Canonical names in matrix order.
    pub fn image_names(&self) -> Vec<&str> {
        self.images.iter().map(|i| i.name.as_str()).collect()
    }

    /// Extended names in matrix order.
    pub fn extended_names(&self) -> Vec<&str> {
        self.extended.iter().map(|e| e.name.as_str()).collect()
    }

    /// Extended images built up to `target`, in canonical order.
    pub fn for_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a ExtendedImage> {
        self.extended.iter().filter(move |e| e.target == target)
    }
}

pub fn build_matrix(
    versions: &[String],
    variants: &[String],
    targets: &[String],
    default_target: &str,
) -> ImageMatrix {
    let images: Vec<CanonicalImage> = variants
        .iter()
        .flat_map(|variant| {
            versions.iter().map(move |version| CanonicalImage {
                version: version.clone(),
                name: if variant.is_empty() {
                    version.clone()
                } else {
                    format!("{version}-{variant}")
                },
            })
        })
        .collect();

    let extended = targets
        .iter()
        .flat_map(|target| {
            images.iter().map(move |image| ExtendedImage {
                base: image.name.clone(),
                target: target.clone(),
                name: if target == default_target {
                    image.name.clone()
                } else {
                    format!("{}-{target}", image.name)
                },
            })
        })
        .collect();

    ImageMatrix { images, extended }
}
