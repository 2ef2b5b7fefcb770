//! Placement of floating surfaces relative to the selection anchor

use serde::{Deserialize, Serialize};

use crate::models::AnchorPoint;

/// Bounding box of the editor container in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
}

/// Where the host should put a floating surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingPosition {
    pub top: f32,
    pub left: f32,
    /// CSS transform applied on top of `top`/`left`, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

/// Action menu: centered above the anchor
pub fn menu_position(anchor: AnchorPoint, gap: f32) -> FloatingPosition {
    FloatingPosition {
        top: anchor.y - gap,
        left: anchor.x,
        transform: Some("translate(-50%, -100%)".to_string()),
    }
}

/// Kind chooser: centered below the anchor
pub fn chooser_position(anchor: AnchorPoint, gap: f32) -> FloatingPosition {
    FloatingPosition {
        top: anchor.y,
        left: anchor.x,
        transform: Some(format!("translate(-50%, {}px)", gap)),
    }
}

/// Suggestion and link panels: below the anchor, inside the container.
///
/// Positions are container-relative; the panel is pulled left so it never
/// overflows the container's right edge.
pub fn panel_position(
    anchor: AnchorPoint,
    container: Option<ContainerRect>,
    panel_width: f32,
    gap: f32,
) -> FloatingPosition {
    let Some(container) = container else {
        return FloatingPosition {
            top: anchor.y + gap,
            left: anchor.x,
            transform: None,
        };
    };

    let top = anchor.y - container.top + gap;
    let mut left = anchor.x - container.left;
    if left + panel_width > container.width {
        left = (container.width - panel_width).max(0.0);
    }

    FloatingPosition {
        top,
        left,
        transform: None,
    }
}
