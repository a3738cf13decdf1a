//! Shared design-token table and the published component-key registry.
//!
//! Tokens are plain data, constructed explicitly and passed through the
//! generation context; nothing in the crate reads them from ambient state.

use std::collections::BTreeMap;

use crate::flow::model::LayoutType;
use crate::foundation::core::{Rgba, Size};
use crate::host::{FontRef, ShadowSpec};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FontSet {
    pub primary: FontRef,
    pub bold: FontRef,
    pub medium: FontRef,
}

impl FontSet {
    /// Every typeface the generator may request, for preloading.
    pub fn all(&self) -> [&FontRef; 3] {
        [&self.primary, &self.bold, &self.medium]
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FontSizes {
    pub headline: f64,
    pub title: f64,
    pub subtitle: f64,
    pub body: f64,
    pub caption: f64,
    pub small: f64,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub accent: Rgba,
    pub white: Rgba,
    pub background: Rgba,
    pub border: Rgba,
    pub success: Rgba,
    pub warning: Rgba,
    pub error: Rgba,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Spacing {
    pub xs: f64,
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
    pub xxl: f64,
    pub xxxl: f64,
    pub xxxxl: f64,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    pub desktop: Size,
    pub mobile: Size,
    pub modal: Size,
    pub tooltip: Size,
    pub icon: Size,
    pub button_height: f64,
    pub input_height: f64,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct CornerRadii {
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
    pub round: f64,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Shadows {
    pub sm: ShadowSpec,
    pub md: ShadowSpec,
    pub lg: ShadowSpec,
}

/// The full token table consumed by builders and component factories.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DesignTokens {
    pub fonts: FontSet,
    pub font_sizes: FontSizes,
    pub colors: Palette,
    pub spacing: Spacing,
    pub dimensions: Dimensions,
    pub radius: CornerRadii,
    pub shadows: Shadows,
}

impl Default for DesignTokens {
    fn default() -> Self {
        Self {
            fonts: FontSet {
                primary: FontRef::new("Inter", "Regular"),
                bold: FontRef::new("Inter", "Bold"),
                medium: FontRef::new("Inter", "Medium"),
            },
            font_sizes: FontSizes {
                headline: 48.0,
                title: 32.0,
                subtitle: 24.0,
                body: 16.0,
                caption: 14.0,
                small: 12.0,
            },
            colors: Palette {
                primary: Rgba::opaque(0.13, 0.15, 0.19),
                secondary: Rgba::opaque(0.44, 0.51, 0.6),
                accent: Rgba::opaque(0.2, 0.47, 1.0),
                white: Rgba::opaque(1.0, 1.0, 1.0),
                background: Rgba::opaque(0.98, 0.98, 0.99),
                border: Rgba::opaque(0.9, 0.9, 0.92),
                success: Rgba::opaque(0.13, 0.69, 0.3),
                warning: Rgba::opaque(1.0, 0.6, 0.0),
                error: Rgba::opaque(0.96, 0.26, 0.21),
            },
            spacing: Spacing {
                xs: 4.0,
                sm: 8.0,
                md: 16.0,
                lg: 24.0,
                xl: 32.0,
                xxl: 48.0,
                xxxl: 64.0,
                xxxxl: 80.0,
            },
            dimensions: Dimensions {
                desktop: Size::new(1400.0, 900.0),
                mobile: Size::new(375.0, 812.0),
                modal: Size::new(600.0, 400.0),
                tooltip: Size::new(320.0, 240.0),
                icon: Size::new(80.0, 80.0),
                button_height: 48.0,
                input_height: 44.0,
            },
            radius: CornerRadii {
                sm: 4.0,
                md: 8.0,
                lg: 16.0,
                xl: 20.0,
                round: 9999.0,
            },
            shadows: Shadows {
                sm: ShadowSpec {
                    color: Rgba::new(0.0, 0.0, 0.0, 0.1),
                    offset_x: 0.0,
                    offset_y: 2.0,
                    radius: 4.0,
                    spread: 0.0,
                },
                md: ShadowSpec {
                    color: Rgba::new(0.0, 0.0, 0.0, 0.15),
                    offset_x: 0.0,
                    offset_y: 4.0,
                    radius: 12.0,
                    spread: 0.0,
                },
                lg: ShadowSpec {
                    color: Rgba::new(0.0, 0.0, 0.0, 0.2),
                    offset_x: 0.0,
                    offset_y: 8.0,
                    radius: 24.0,
                    spread: 0.0,
                },
            },
        }
    }
}

/// Catalog keys of the published layout components, by layout type.
///
/// Keys change when the library republishes; they are data, not code, so the
/// default set can be overridden wholesale.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LibraryKeys {
    keys: BTreeMap<String, String>,
}

impl LibraryKeys {
    pub fn new(keys: BTreeMap<String, String>) -> Self {
        Self { keys }
    }

    fn entry_name(layout: LayoutType) -> &'static str {
        match layout {
            LayoutType::FullScreen => "full-screen-layout",
            LayoutType::ModalForm => "modal-layout-form",
            LayoutType::ModalLayout => "modal-layout",
            LayoutType::SplitScreen => "split-screen-layout",
            LayoutType::TooltipOverlay => "tooltip-layout",
        }
    }

    pub fn component_key(&self, layout: LayoutType) -> Option<&str> {
        self.keys.get(Self::entry_name(layout)).map(String::as_str)
    }
}

impl Default for LibraryKeys {
    fn default() -> Self {
        let keys = [
            ("full-screen-layout", "1612-2103"),
            ("modal-layout-form", "1667-23421"),
            ("modal-layout", "1612-2656"),
            ("tooltip-layout", "1612-3898"),
            ("split-screen-layout", "1612-4016"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
        Self { keys }
    }
}
