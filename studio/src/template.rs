//! Template initializer: builds the starting scene from campaign data.
//!
//! DESIGN
//! ======
//! The preset picked in the gallery carries no layout of its own; the layout
//! is computed here. Steps run in a fixed order because the order is the
//! paint order:
//!
//! 1. background gradient (always, index 0)
//! 2. campaign image, when the source decodes
//! 3. headline text (paid headline, else primary text)
//! 4. description text (paid ad description, else description)
//! 5. call-to-action button and label, paid campaigns only
//!
//! A step whose input is missing adds nothing. Paid-only fields are read
//! exclusively through [`CampaignSpec::paid_fields`].

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use tracing::{info, warn};

use crate::bitmap;
use crate::campaign::{CallToAction, CampaignSpec, non_blank};
use crate::consts::*;
use crate::doc::{DrawableObject, ObjectKind, Scene, TextStyle};
use crate::geom::{Point, Scale, Size};
use crate::platform::dimensions_for;
use crate::style::{Fill, FontWeight, LinearGradient, TextAnchor};

/// Build the initial scene for a campaign.
#[must_use]
pub fn initialize(campaign: &CampaignSpec) -> Scene {
    let size = dimensions_for(campaign.platform);
    let mut scene = Scene::new(size);
    let paid = campaign.paid_fields();

    scene.push(background());

    let has_image = match campaign.source_image.as_deref() {
        Some(bytes) => match bitmap::decode(bytes) {
            Ok(bitmap) => {
                scene.push(image_object(bitmap));
                true
            }
            Err(e) => {
                warn!(error = %e, "campaign image could not be decoded; skipping");
                false
            }
        },
        None => false,
    };

    let headline = paid
        .and_then(|p| p.headline)
        .or_else(|| non_blank(Some(campaign.primary_text.as_str())));
    if let Some(content) = headline {
        scene.push(headline_text(content, has_image));
    }

    let description = paid
        .and_then(|p| p.ad_description)
        .or_else(|| non_blank(Some(campaign.description.as_str())));
    if let Some(content) = description {
        scene.push(description_text(content, has_image, size));
    }

    if let Some(cta) = paid.and_then(|p| p.call_to_action) {
        let (button, label) = call_to_action(cta, size);
        scene.push(button);
        scene.push(label);
    }

    info!(
        platform = %campaign.platform,
        width = size.width,
        height = size.height,
        count = scene.len(),
        "initialized scene from campaign"
    );
    scene
}

/// Image object at the standard anchor and insertion scale.
#[must_use]
pub fn image_object(bitmap: bitmap::Bitmap) -> DrawableObject {
    DrawableObject::new(IMAGE_ANCHOR.into(), ObjectKind::Image { bitmap }).with_scale(Scale::uniform(IMAGE_SCALE))
}

fn background() -> DrawableObject {
    let gradient =
        LinearGradient::two_stop(BACKGROUND_GRADIENT_ANGLE_DEG, BACKGROUND_GRADIENT_START, BACKGROUND_GRADIENT_END);
    DrawableObject::new(Point::new(0.0, 0.0), ObjectKind::Background { fill: Fill::Linear(gradient) })
}

fn headline_text(content: &str, has_image: bool) -> DrawableObject {
    let top = if has_image { HEADLINE_TOP_WITH_IMAGE } else { HEADLINE_TOP };
    let mut style = TextStyle::new(content, HEADLINE_FONT_SIZE, CAMPAIGN_TEXT_FILL);
    style.font_weight = FontWeight::Bold;
    style.shadow = Some(HEADLINE_SHADOW);
    DrawableObject::new(Point::new(CONTENT_LEFT, top), ObjectKind::Text(style))
}

fn description_text(content: &str, has_image: bool, size: Size) -> DrawableObject {
    let top = if has_image { DESCRIPTION_TOP_WITH_IMAGE } else { DESCRIPTION_TOP };
    let mut style = TextStyle::new(content, DESCRIPTION_FONT_SIZE, CAMPAIGN_TEXT_FILL);
    style.wrap_width = Some(size.w() - DESCRIPTION_WRAP_INSET);
    DrawableObject::new(Point::new(CONTENT_LEFT, top), ObjectKind::Text(style))
}

/// The rounded button followed by its centered label.
fn call_to_action(cta: CallToAction, size: Size) -> (DrawableObject, DrawableObject) {
    let top = size.h() - CTA_BOTTOM_OFFSET;
    let button = DrawableObject::new(
        Point::new(CONTENT_LEFT, top),
        ObjectKind::Rect {
            width: CTA_WIDTH,
            height: CTA_HEIGHT,
            fill: CTA_FILL,
            stroke: None,
            stroke_width: 0.0,
            corner_radius: Some(CTA_CORNER_RADIUS),
        },
    );

    let mut style = TextStyle::new(cta.label(), CTA_FONT_SIZE, CAMPAIGN_TEXT_FILL);
    style.font_weight = FontWeight::Bold;
    style.anchor = TextAnchor::Center;
    let center = Point::new(CONTENT_LEFT + CTA_WIDTH / 2.0, top + CTA_HEIGHT / 2.0);
    let label = DrawableObject::new(center, ObjectKind::Text(style));

    (button, label)
}
