//! Clickable severity legend overlay.
//!
//! A fixed-position box lists every [`SeverityTier`] with its color swatch.
//! Clicking an entry opens a second box with the tier's definition text.

use crash_map_crash_models::SeverityTier;

use crate::html::{escape, template_literal};

const LEGEND_STYLE: &str = "position: fixed; bottom: 50px; left: 50px; width: 220px; \
    background: white; padding: 10px; border-radius: 5px; \
    border: 2px solid grey; z-index: 9999; font-size: 14px; \
    box-shadow: 3px 3px 5px grey;";

const DEFINITION_STYLE: &str = "display: none; position: fixed; bottom: 50px; left: 280px; width: 300px; \
    background: white; padding: 15px; border-radius: 5px; \
    border: 2px solid grey; z-index: 9999; font-size: 14px; \
    box-shadow: 3px 3px 5px grey;";

/// Returns the legend markup, definition popup and its script.
#[must_use]
pub fn legend_html() -> String {
    let mut html = String::new();

    html.push_str(&format!("<div id=\"legend\" style=\"{LEGEND_STYLE}\">\n"));
    html.push_str("  <h4 style=\"margin: 5px 0\">Accident Severity</h4>\n");
    for tier in SeverityTier::all() {
        html.push_str(&format!(
            "  <div class=\"legend-item\" style=\"display: flex; align-items: center; cursor: pointer;\" onclick=\"showDefinition('{label}')\">\n    \
             <div style=\"background: {color}; width: 12px; height: 12px; border-radius: 50%; margin-right: 5px\"></div>\n    \
             <span>{label}</span>\n  \
             </div>\n",
            label = escape(tier.label()),
            color = tier.style().color,
        ));
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<div id=\"definition-popup\" style=\"{DEFINITION_STYLE}\">\n  \
         <h4 id=\"popup-title\" style=\"margin-top: 0;\"></h4>\n  \
         <p id=\"popup-content\"></p>\n  \
         <button onclick=\"document.getElementById('definition-popup').style.display='none'\" \
         style=\"float: right; padding: 3px 8px; margin-top: 5px;\">Close</button>\n\
         </div>\n"
    ));

    html.push_str("<script>\nconst definitions = {\n");
    for tier in SeverityTier::all() {
        html.push_str(&format!(
            "  '{}': `{}`,\n",
            tier.label(),
            template_literal(tier.definition())
        ));
    }
    html.push_str(
        "};\n\
         function showDefinition(severity) {\n  \
         const popup = document.getElementById('definition-popup');\n  \
         document.getElementById('popup-title').textContent = severity + ' Accidents';\n  \
         document.getElementById('popup-content').textContent = definitions[severity];\n  \
         popup.style.display = 'block';\n\
         }\n\
         </script>\n",
    );

    html
}
