// File: stylegate-core/src/handlers.rs
//! Default validators for standard CSS properties.
//!
//! When a rule is committed without an explicit strategy, the policy builder looks
//! the property up here. Each validator is permissive about well-formed values
//! (lengths, colors, keywords) but bounded: `url()` only admits plain http(s)
//! references, and there is no `expression()` or free-form function support.
//! Properties missing from the table get a validator that rejects everything.
//!
//! All validators receive the normalized value (lowercased, escapes decoded).
//!
//! License: MIT OR Apache-2.0

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::StyleHandler;

type Validator = fn(&str) -> bool;

const CSS_WIDE_KEYWORDS: &[&str] = &["initial", "inherit", "unset", "revert"];

const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const BORDER_WIDTHS: &[&str] = &["thin", "medium", "thick"];
const IMAGE_REPEATS: &[&str] = &["stretch", "repeat", "round", "space"];
const BLEND_MODES: &[&str] = &[
    "normal", "multiply", "screen", "overlay", "darken", "lighten", "color-dodge", "color-burn",
    "hard-light", "soft-light", "difference", "exclusion", "hue", "saturation", "color",
    "luminosity",
];
const BOXES: &[&str] = &["border-box", "padding-box", "content-box"];
const POSITION_KEYWORDS: &[&str] = &["left", "right", "top", "bottom", "center"];
const REPEAT_KEYWORDS: &[&str] = &["repeat", "repeat-x", "repeat-y", "no-repeat", "space", "round"];
const ATTACHMENTS: &[&str] = &["scroll", "fixed", "local"];
const SIZE_KEYWORDS: &[&str] = &["auto", "min-content", "max-content", "fit-content"];
const OVERFLOW_KEYWORDS: &[&str] = &["visible", "hidden", "clip", "scroll", "auto"];
const TEXT_ALIGN: &[&str] = &["left", "right", "center", "justify", "start", "end", "match-parent"];
const DECORATION_LINES: &[&str] = &["none", "underline", "overline", "line-through", "blink"];
const DECORATION_STYLES: &[&str] = &["solid", "double", "dotted", "dashed", "wavy"];
const FLEX_DIRECTIONS: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
const FLEX_WRAPS: &[&str] = &["nowrap", "wrap", "wrap-reverse"];
const FONT_SIZES: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large",
    "smaller", "larger",
];
const FONT_STYLES: &[&str] = &["normal", "italic", "oblique"];
const FONT_WEIGHTS: &[&str] = &["normal", "bold", "bolder", "lighter"];
const FONT_STRETCHES: &[&str] = &[
    "normal", "ultra-condensed", "extra-condensed", "condensed", "semi-condensed",
    "semi-expanded", "expanded", "extra-expanded", "ultra-expanded",
];
const LIST_STYLE_TYPES: &[&str] = &[
    "disc", "circle", "square", "decimal", "decimal-leading-zero", "lower-roman", "upper-roman",
    "lower-greek", "lower-latin", "upper-latin", "lower-alpha", "upper-alpha", "armenian",
    "georgian", "none",
];
const BREAK_KEYWORDS: &[&str] = &[
    "auto", "avoid", "always", "all", "avoid-page", "page", "left", "right", "recto", "verso",
    "avoid-column", "column", "avoid-region", "region",
];
const ALIGN_ITEMS: &[&str] = &[
    "normal", "stretch", "center", "flex-start", "flex-end", "start", "end", "self-start",
    "self-end", "baseline",
];
const ALIGN_SELF: &[&str] = &[
    "auto", "normal", "stretch", "center", "flex-start", "flex-end", "start", "end",
    "self-start", "self-end", "baseline",
];
const ALIGN_CONTENT: &[&str] = &[
    "normal", "stretch", "center", "flex-start", "flex-end", "start", "end", "space-between",
    "space-around", "space-evenly", "baseline",
];
const JUSTIFY_CONTENT: &[&str] = &[
    "normal", "stretch", "center", "flex-start", "flex-end", "start", "end", "left", "right",
    "space-between", "space-around", "space-evenly",
];
const ANIMATION_DIRECTIONS: &[&str] = &["normal", "reverse", "alternate", "alternate-reverse"];
const ANIMATION_FILL_MODES: &[&str] = &["none", "forwards", "backwards", "both"];
const CURSORS: &[&str] = &[
    "auto", "default", "none", "context-menu", "help", "pointer", "progress", "wait", "cell",
    "crosshair", "text", "vertical-text", "alias", "copy", "move", "no-drop", "not-allowed",
    "grab", "grabbing", "all-scroll", "col-resize", "row-resize", "n-resize", "e-resize",
    "s-resize", "w-resize", "ne-resize", "nw-resize", "se-resize", "sw-resize", "ew-resize",
    "ns-resize", "nesw-resize", "nwse-resize", "zoom-in", "zoom-out",
];
const DISPLAYS: &[&str] = &[
    "inline", "block", "contents", "flex", "grid", "inline-block", "inline-flex", "inline-grid",
    "inline-table", "list-item", "run-in", "table", "table-caption", "table-column-group",
    "table-header-group", "table-footer-group", "table-row-group", "table-cell", "table-column",
    "table-row", "flow-root", "none",
];

static NAMED_COLORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend([
        "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
        "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
        "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
        "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
        "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
        "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
        "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
        "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
        "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
        "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
        "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
        "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
        "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen",
        "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
        "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
        "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
        "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid",
        "palegoldenrod", "palegreen", "paleturquoise", "palevioletred", "papayawhip",
        "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple", "red",
        "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell",
        "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow",
        "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet",
        "wheat", "white", "whitesmoke", "yellow", "yellowgreen", "transparent", "currentcolor",
    ]);
    set
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in validator pattern is a valid regex")
}

static LENGTH: Lazy<Regex> = Lazy::new(|| {
    compile(r"^[-+]?(\d+\.?\d*|\.\d+)(px|em|rem|ex|ch|vw|vh|vmin|vmax|cm|mm|q|in|pt|pc|%)?$")
});
static NUMBER: Lazy<Regex> = Lazy::new(|| compile(r"^[-+]?(\d+\.?\d*|\.\d+)$"));
static INTEGER: Lazy<Regex> = Lazy::new(|| compile(r"^[-+]?\d+$"));
static TIME: Lazy<Regex> = Lazy::new(|| compile(r"^[-+]?(\d+\.?\d*|\.\d+)(s|ms)$"));
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| compile(r"^#([0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})$"));
static FUNCTIONAL_COLOR: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(rgba?|hsla?)\((\s*[-+]?(\d+\.?\d*|\.\d+)(%|deg)?\s*[,/]?){3,4}\s*\)$")
});
static URL: Lazy<Regex> = Lazy::new(|| {
    compile(
        r#"^url\(\s*('https?://[^'"()\\\s]*'|"https?://[^'"()\\\s]*"|https?://[^'"()\\\s]*)\s*\)$"#,
    )
});
static TIMING_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r"^(ease|ease-in|ease-out|ease-in-out|linear|step-start|step-end)$",
        r"|^cubic-bezier\((\s*[-+]?(\d+\.?\d*|\.\d+)\s*,){3}\s*[-+]?(\d+\.?\d*|\.\d+)\s*\)$",
        r"|^steps\(\s*\d+\s*(,\s*(start|end|jump-start|jump-end|jump-none|jump-both)\s*)?\)$",
    ))
});
static IDENT: Lazy<Regex> = Lazy::new(|| compile(r"^-?[a-z_][a-z0-9_-]*$"));
static FONT_FAMILY: Lazy<Regex> = Lazy::new(|| {
    compile(r#"^([a-z0-9 _-]+|"[a-z0-9 _-]+"|'[a-z0-9 _-]+')(\s*,\s*([a-z0-9 _-]+|"[a-z0-9 _-]+"|'[a-z0-9 _-]+'))*$"#)
});
static FONT_FAMILY_PART: Lazy<Regex> =
    Lazy::new(|| compile(r#"^("[a-z0-9_-]+|'[a-z0-9_-]+|[a-z0-9_-]+)["']?,?$"#));
static TRANSFORM_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(matrix|matrix3d|translate|translate3d|translatex|translatey|translatez|scale|scale3d|scalex|scaley|scalez|rotate|rotate3d|rotatex|rotatey|rotatez|skew|skewx|skewy|perspective)\([-+0-9a-z.,%\s]*\)$")
});
static FILTER_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(blur|brightness|contrast|grayscale|hue-rotate|invert|opacity|saturate|sepia)\([-+0-9a-z.%\s]*\)$")
});
static CLIP_RECT: Lazy<Regex> = Lazy::new(|| compile(r"^rect\(([-+0-9a-z.%\s,]*)\)$"));
static QUOTED_STRING: Lazy<Regex> = Lazy::new(|| compile(r#"^('[^'\\]*'|"[^"\\]*")$"#));
static FLEX_FRACTION: Lazy<Regex> = Lazy::new(|| compile(r"^[+]?(\d+\.?\d*|\.\d+)fr$"));
static TRACK_FUNCTION: Lazy<Regex> =
    Lazy::new(|| compile(r"^(minmax|repeat|fit-content)\([-+0-9a-z.,%\s]*\)$"));
static GRID_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(auto|span\s+\d+|span\s+[a-z_][a-z0-9_-]*|[-+]?\d+(\s+[a-z_][a-z0-9_-]*)?|[a-z_][a-z0-9_-]*)$")
});

/// True for `initial`, `inherit`, `unset` and `revert`.
pub fn is_css_wide_keyword(value: &str) -> bool {
    CSS_WIDE_KEYWORDS.contains(&value)
}

/// A length or percentage; unitless numbers are accepted as well.
pub fn is_length(value: &str) -> bool {
    LENGTH.is_match(value)
}

/// Hex, `rgb[a]()`, `hsl[a]()` or a named color.
pub fn is_color(value: &str) -> bool {
    HEX_COLOR.is_match(value) || FUNCTIONAL_COLOR.is_match(value) || NAMED_COLORS.contains(value)
}

/// An absolute http(s) `url()` reference.
pub fn is_url(value: &str) -> bool {
    URL.is_match(value)
}

fn is_number(value: &str) -> bool {
    NUMBER.is_match(value)
}

fn is_integer(value: &str) -> bool {
    INTEGER.is_match(value)
}

fn is_time(value: &str) -> bool {
    TIME.is_match(value)
}

fn is_timing_function(value: &str) -> bool {
    TIMING_FUNCTION.is_match(value)
}

fn is_ident(value: &str) -> bool {
    IDENT.is_match(value)
}

/// Splits on `separator` outside parentheses and quoted strings, keeping empty
/// pieces.
fn split_outside_nesting(value: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;
    for (index, character) in value.char_indices() {
        match (quote, character) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(character),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 && is_separator(c) => {
                parts.push(value[start..index].trim());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts
}

/// Like [`split_outside_nesting`], dropping empty pieces.
fn split_top_level(value: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = split_outside_nesting(value, is_separator);
    parts.retain(|part| !part.is_empty());
    parts
}

/// Whitespace-separated components, functions kept whole.
fn components(value: &str) -> Vec<&str> {
    split_top_level(value, |c| c.is_ascii_whitespace())
}

fn keyword(value: &str, allowed: &[&str]) -> bool {
    is_css_wide_keyword(value) || allowed.contains(&value)
}

/// Between one and `max` components, each accepted by `accept`.
fn each_component(value: &str, max: usize, accept: impl Fn(&str) -> bool) -> bool {
    let parts = components(value);
    !parts.is_empty() && parts.len() <= max && parts.iter().all(|part| accept(part))
}

/// A comma-separated list, each item accepted by `accept`.
fn comma_list(value: &str, accept: impl Fn(&str) -> bool) -> bool {
    let items = split_top_level(value, |c| c == ',');
    !items.is_empty() && items.iter().all(|item| accept(item))
}

/// Between one and `max` pieces split on `separator`, none of them empty.
fn separated(value: &str, separator: char, max: usize, accept: impl Fn(&str) -> bool) -> bool {
    let pieces = split_outside_nesting(value, |c| c == separator);
    pieces.len() <= max && pieces.iter().all(|piece| !piece.is_empty() && accept(piece))
}

fn length_or(value: &str, allowed: &[&str]) -> bool {
    keyword(value, allowed) || is_length(value)
}

fn border_part(part: &str) -> bool {
    is_length(part) || BORDER_WIDTHS.contains(&part) || BORDER_STYLES.contains(&part) || is_color(part)
}

fn border(value: &str) -> bool {
    is_css_wide_keyword(value) || each_component(value, 3, border_part)
}

fn border_color(value: &str) -> bool {
    is_css_wide_keyword(value) || is_color(value)
}

fn border_style(value: &str) -> bool {
    keyword(value, BORDER_STYLES)
}

fn border_width(value: &str) -> bool {
    length_or(value, BORDER_WIDTHS)
}

/// Up to four offsets, plus an optional `fill`.
fn border_image_slice(value: &str) -> bool {
    if is_css_wide_keyword(value) {
        return true;
    }
    let parts = components(value);
    let fills = parts.iter().filter(|part| **part == "fill").count();
    let offsets = parts.len() - fills;
    !parts.is_empty()
        && fills <= 1
        && offsets <= 4
        && parts.iter().all(|part| *part == "fill" || is_length(part))
}

fn corner_radius(value: &str) -> bool {
    is_css_wide_keyword(value) || each_component(value, 2, is_length)
}

/// Up to four radii, optionally followed by `/` and up to four more.
fn border_radius(value: &str) -> bool {
    is_css_wide_keyword(value) || separated(value, '/', 2, |radii| each_component(radii, 4, is_length))
}

fn inset(value: &str) -> bool {
    length_or(value, &["auto"])
}

fn size(value: &str) -> bool {
    length_or(value, SIZE_KEYWORDS)
}

fn max_size(value: &str) -> bool {
    length_or(value, &["none", "min-content", "max-content", "fit-content"])
}

fn position_part(part: &str) -> bool {
    is_length(part) || POSITION_KEYWORDS.contains(&part)
}

fn background_position(value: &str) -> bool {
    is_css_wide_keyword(value) || comma_list(value, |item| each_component(item, 4, position_part))
}

fn object_position(value: &str) -> bool {
    is_css_wide_keyword(value) || each_component(value, 2, position_part)
}

fn transform_origin(value: &str) -> bool {
    is_css_wide_keyword(value) || each_component(value, 3, position_part)
}

fn times(value: &str) -> bool {
    is_css_wide_keyword(value) || comma_list(value, is_time)
}

fn timing_functions(value: &str) -> bool {
    is_css_wide_keyword(value) || comma_list(value, is_timing_function)
}

/// Two to four lengths, at most one color and at most one `inset`.
fn shadow_layer(layer: &str) -> bool {
    let parts = components(layer);
    let lengths = parts.iter().filter(|part| is_length(part)).count();
    let colors = parts.iter().filter(|part| is_color(part)).count();
    let insets = parts.iter().filter(|part| **part == "inset").count();
    (2..=4).contains(&lengths) && colors <= 1 && insets <= 1 && lengths + colors + insets == parts.len()
}

fn shadow(value: &str) -> bool {
    keyword(value, &["none"]) || comma_list(value, shadow_layer)
}

fn is_quoted(value: &str) -> bool {
    QUOTED_STRING.is_match(value)
}

fn track_size(part: &str) -> bool {
    is_length(part)
        || FLEX_FRACTION.is_match(part)
        || TRACK_FUNCTION.is_match(part)
        || ["auto", "min-content", "max-content"].contains(&part)
}

fn track_list(value: &str) -> bool {
    each_component(value, 32, track_size)
}

/// `rows / columns` track lists.
fn grid_template(value: &str) -> bool {
    keyword(value, &["none"]) || separated(value, '/', 2, track_list)
}

fn grid_line(value: &str) -> bool {
    GRID_LINE.is_match(value)
}

fn grid_lines(value: &str, max: usize) -> bool {
    is_css_wide_keyword(value) || separated(value, '/', max, grid_line)
}

fn text_decoration_line(value: &str) -> bool {
    keyword(value, &["none"])
        || each_component(value, 4, |part| part != "none" && DECORATION_LINES.contains(&part))
}

fn overflow_wrap(value: &str) -> bool {
    keyword(value, &["normal", "break-word", "anywhere"])
}

fn validators() -> HashMap<&'static str, Validator> {
    let mut map: HashMap<&'static str, Validator> = HashMap::new();
    let mut register = |names: &[&'static str], validator: Validator| {
        for name in names {
            map.insert(*name, validator);
        }
    };

    // Alignment
    register(&["align-content"], |v| keyword(v, ALIGN_CONTENT));
    register(&["align-items"], |v| keyword(v, ALIGN_ITEMS));
    register(&["align-self"], |v| keyword(v, ALIGN_SELF));
    register(&["justify-content"], |v| keyword(v, JUSTIFY_CONTENT));
    register(&["all"], is_css_wide_keyword);

    // Animation and transition
    register(
        &["animation-delay", "animation-duration", "transition-delay", "transition-duration"],
        times,
    );
    register(
        &["animation-timing-function", "transition-timing-function"],
        timing_functions,
    );
    register(&["animation-direction"], |v| {
        is_css_wide_keyword(v) || comma_list(v, |item| ANIMATION_DIRECTIONS.contains(&item))
    });
    register(&["animation-fill-mode"], |v| {
        is_css_wide_keyword(v) || comma_list(v, |item| ANIMATION_FILL_MODES.contains(&item))
    });
    register(&["animation-iteration-count"], |v| {
        is_css_wide_keyword(v) || comma_list(v, |item| item == "infinite" || is_number(item))
    });
    register(&["animation-name"], |v| {
        is_css_wide_keyword(v) || comma_list(v, is_ident)
    });
    register(&["animation-play-state"], |v| keyword(v, &["running", "paused"]));
    register(&["animation"], |v| {
        is_css_wide_keyword(v)
            || comma_list(v, |item| {
                each_component(item, 8, |part| {
                    is_time(part) || is_timing_function(part) || is_number(part) || is_ident(part)
                })
            })
    });
    register(&["transition-property"], |v| {
        keyword(v, &["none", "all"]) || comma_list(v, is_ident)
    });
    register(&["transition"], |v| {
        is_css_wide_keyword(v)
            || comma_list(v, |item| {
                each_component(item, 4, |part| {
                    is_time(part) || is_timing_function(part) || is_ident(part)
                })
            })
    });

    // Background
    register(&["backface-visibility"], |v| keyword(v, &["visible", "hidden"]));
    register(&["background-attachment"], |v| keyword(v, ATTACHMENTS));
    register(&["background-blend-mode", "mix-blend-mode"], |v| keyword(v, BLEND_MODES));
    register(&["background-clip"], |v| keyword(v, BOXES) || v == "text");
    register(&["background-origin"], |v| keyword(v, BOXES));
    register(&["background-color"], border_color);
    register(&["background-image"], |v| {
        keyword(v, &["none"]) || comma_list(v, |item| item == "none" || is_url(item))
    });
    register(&["background-position"], background_position);
    register(&["object-position", "perspective-origin"], object_position);
    register(&["transform-origin"], transform_origin);
    register(&["background-repeat"], |v| {
        is_css_wide_keyword(v) || each_component(v, 2, |part| REPEAT_KEYWORDS.contains(&part))
    });
    register(&["background-size"], |v| {
        keyword(v, &["cover", "contain"])
            || each_component(v, 2, |part| part == "auto" || is_length(part))
    });
    register(&["background"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 10, |part| {
                part == "none"
                    || is_color(part)
                    || is_url(part)
                    || is_length(part)
                    || POSITION_KEYWORDS.contains(&part)
                    || REPEAT_KEYWORDS.contains(&part)
                    || ATTACHMENTS.contains(&part)
                    || BOXES.contains(&part)
            })
    });

    // Border and outline
    register(
        &["border", "border-top", "border-right", "border-bottom", "border-left", "outline", "column-rule"],
        border,
    );
    register(
        &[
            "border-top-color", "border-right-color", "border-bottom-color", "border-left-color",
            "outline-color", "column-rule-color", "text-decoration-color", "color",
        ],
        border_color,
    );
    register(&["caret-color"], |v| v == "auto" || border_color(v));
    register(&["border-color"], |v| is_css_wide_keyword(v) || each_component(v, 4, is_color));
    register(
        &[
            "border-top-style", "border-right-style", "border-bottom-style", "border-left-style",
            "outline-style", "column-rule-style",
        ],
        border_style,
    );
    register(&["border-style"], |v| {
        is_css_wide_keyword(v) || each_component(v, 4, |part| BORDER_STYLES.contains(&part))
    });
    register(
        &[
            "border-top-width", "border-right-width", "border-bottom-width", "border-left-width",
            "outline-width", "column-rule-width",
        ],
        border_width,
    );
    register(&["border-width"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 4, |part| is_length(part) || BORDER_WIDTHS.contains(&part))
    });
    register(&["border-radius"], border_radius);
    register(
        &[
            "border-top-left-radius", "border-top-right-radius", "border-bottom-left-radius",
            "border-bottom-right-radius",
        ],
        corner_radius,
    );
    register(&["border-image-source"], |v| keyword(v, &["none"]) || is_url(v));
    register(&["border-image-repeat"], |v| {
        is_css_wide_keyword(v) || each_component(v, 2, |part| IMAGE_REPEATS.contains(&part))
    });
    register(&["border-image-slice"], border_image_slice);
    register(&["border-image-outset"], |v| is_css_wide_keyword(v) || each_component(v, 4, is_length));
    register(&["border-image-width"], |v| {
        is_css_wide_keyword(v) || each_component(v, 4, |part| part == "auto" || is_length(part))
    });
    register(&["border-image"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 12, |part| {
                part == "/" || part == "fill" || is_url(part) || is_length(part) || IMAGE_REPEATS.contains(&part)
            })
    });
    register(&["border-collapse"], |v| keyword(v, &["separate", "collapse"]));
    register(&["border-spacing"], |v| is_css_wide_keyword(v) || each_component(v, 2, is_length));
    register(&["outline-offset"], |v| is_css_wide_keyword(v) || is_length(v));

    // Box
    register(&["top", "right", "bottom", "left"], inset);
    register(&["width", "height", "min-width", "min-height", "flex-basis"], |v| {
        size(v) || v == "content"
    });
    register(&["max-width", "max-height"], max_size);
    register(&["margin-top", "margin-right", "margin-bottom", "margin-left"], |v| {
        length_or(v, &["auto"])
    });
    register(&["margin"], |v| {
        is_css_wide_keyword(v) || each_component(v, 4, |part| part == "auto" || is_length(part))
    });
    register(&["padding-top", "padding-right", "padding-bottom", "padding-left"], |v| {
        is_css_wide_keyword(v) || is_length(v)
    });
    register(&["padding"], |v| is_css_wide_keyword(v) || each_component(v, 4, is_length));
    register(&["box-sizing"], |v| keyword(v, &["content-box", "border-box"]));
    register(&["box-shadow", "text-shadow"], shadow);
    register(&["box-decoration-break"], |v| keyword(v, &["slice", "clone"]));
    register(&["clear"], |v| {
        keyword(v, &["none", "left", "right", "both", "inline-start", "inline-end"])
    });
    register(&["float"], |v| keyword(v, &["none", "left", "right", "inline-start", "inline-end"]));
    register(&["clip"], |v| keyword(v, &["auto"]) || CLIP_RECT.is_match(v));
    register(&["display"], |v| keyword(v, DISPLAYS));
    register(&["visibility"], |v| keyword(v, &["visible", "hidden", "collapse"]));
    register(&["position"], |v| {
        keyword(v, &["static", "relative", "absolute", "fixed", "sticky"])
    });
    register(&["overflow"], |v| {
        is_css_wide_keyword(v) || each_component(v, 2, |part| OVERFLOW_KEYWORDS.contains(&part))
    });
    register(&["overflow-x", "overflow-y"], |v| keyword(v, OVERFLOW_KEYWORDS));
    register(&["z-index"], |v| keyword(v, &["auto"]) || is_integer(v));
    register(&["opacity"], |v| is_css_wide_keyword(v) || is_number(v) || (is_length(v) && v.ends_with('%')));
    register(&["order", "orphans", "widows"], |v| is_css_wide_keyword(v) || is_integer(v));
    register(&["object-fit"], |v| keyword(v, &["fill", "contain", "cover", "none", "scale-down"]));
    register(&["resize"], |v| {
        keyword(v, &["none", "both", "horizontal", "vertical", "block", "inline"])
    });
    register(&["isolation"], |v| keyword(v, &["auto", "isolate"]));

    // Columns
    register(&["column-count"], |v| keyword(v, &["auto"]) || is_integer(v));
    register(&["column-fill"], |v| keyword(v, &["balance", "auto"]));
    register(&["column-gap", "row-gap", "gap"], |v| length_or(v, &["normal"]));
    register(&["column-span"], |v| keyword(v, &["none", "all"]));
    register(&["column-width"], |v| length_or(v, &["auto"]));
    register(&["columns"], |v| {
        is_css_wide_keyword(v) || each_component(v, 2, |part| part == "auto" || is_length(part))
    });
    register(&["break-after", "break-before"], |v| keyword(v, BREAK_KEYWORDS));
    register(&["break-inside"], |v| {
        keyword(v, &["auto", "avoid", "avoid-page", "avoid-column", "avoid-region"])
    });
    register(&["page-break-after", "page-break-before"], |v| {
        keyword(v, &["auto", "always", "avoid", "left", "right"])
    });
    register(&["page-break-inside"], |v| keyword(v, &["auto", "avoid"]));

    // Flex
    register(&["flex-direction"], |v| keyword(v, FLEX_DIRECTIONS));
    register(&["flex-wrap"], |v| keyword(v, FLEX_WRAPS));
    register(&["flex-flow"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 2, |part| {
                FLEX_DIRECTIONS.contains(&part) || FLEX_WRAPS.contains(&part)
            })
    });
    register(&["flex-grow", "flex-shrink"], |v| is_css_wide_keyword(v) || is_number(v));
    register(&["flex"], |v| {
        keyword(v, &["none", "auto"])
            || each_component(v, 3, |part| {
                is_number(part) || is_length(part) || part == "auto" || part == "content"
            })
    });

    // Grid
    register(&["grid", "grid-template"], grid_template);
    register(
        &["grid-template-rows", "grid-template-columns", "grid-auto-rows", "grid-auto-columns"],
        |v| keyword(v, &["none"]) || track_list(v),
    );
    register(&["grid-template-areas"], |v| {
        keyword(v, &["none"]) || each_component(v, 32, is_quoted)
    });
    register(&["grid-area"], |v| grid_lines(v, 4));
    register(&["grid-row", "grid-column"], |v| grid_lines(v, 2));
    register(
        &["grid-row-start", "grid-row-end", "grid-column-start", "grid-column-end"],
        |v| grid_lines(v, 1),
    );
    register(&["grid-auto-flow"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 2, |part| ["row", "column", "dense"].contains(&part))
    });
    register(&["grid-gap"], |v| is_css_wide_keyword(v) || each_component(v, 2, is_length));
    register(&["grid-row-gap", "grid-column-gap"], |v| is_css_wide_keyword(v) || is_length(v));

    // Font and text
    register(&["font-family"], |v| is_css_wide_keyword(v) || FONT_FAMILY.is_match(v));
    register(&["font-size"], |v| length_or(v, FONT_SIZES));
    register(&["font-style"], |v| keyword(v, FONT_STYLES));
    register(&["font-weight"], |v| keyword(v, FONT_WEIGHTS) || is_integer(v));
    register(&["font-stretch"], |v| keyword(v, FONT_STRETCHES) || (is_length(v) && v.ends_with('%')));
    register(&["font-variant"], |v| keyword(v, &["normal", "small-caps"]));
    register(&["font-variant-caps"], |v| {
        keyword(
            v,
            &[
                "normal", "small-caps", "all-small-caps", "petite-caps", "all-petite-caps",
                "unicase", "titling-caps",
            ],
        )
    });
    register(&["font-kerning"], |v| keyword(v, &["auto", "normal", "none"]));
    register(&["font-language-override"], |v| keyword(v, &["normal"]) || is_quoted(v));
    register(&["font-size-adjust"], |v| keyword(v, &["none", "auto"]) || is_number(v));
    register(&["font-synthesis"], |v| {
        keyword(v, &["none"])
            || each_component(v, 3, |part| ["weight", "style", "small-caps"].contains(&part))
    });
    register(&["font-variant-position"], |v| keyword(v, &["normal", "sub", "super"]));
    register(&["font"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 10, |part| {
                is_length(part)
                    || FONT_SIZES.contains(&part)
                    || FONT_STYLES.contains(&part)
                    || FONT_WEIGHTS.contains(&part)
                    || FONT_STRETCHES.contains(&part)
                    || part == "small-caps"
                    || part
                        .split_once('/')
                        .is_some_and(|(size, line)| is_length(size) && (line == "normal" || is_length(line)))
                    || FONT_FAMILY_PART.is_match(part)
            })
    });
    register(&["letter-spacing", "word-spacing"], |v| length_or(v, &["normal"]));
    register(&["line-height"], |v| length_or(v, &["normal"]));
    register(&["text-align"], |v| keyword(v, TEXT_ALIGN));
    register(&["text-align-last"], |v| keyword(v, TEXT_ALIGN) || v == "auto");
    register(&["text-decoration-line"], text_decoration_line);
    register(&["text-decoration-style"], |v| keyword(v, DECORATION_STYLES));
    register(&["text-decoration"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 4, |part| {
                DECORATION_LINES.contains(&part) || DECORATION_STYLES.contains(&part) || is_color(part)
            })
    });
    register(&["text-indent"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 3, |part| is_length(part) || part == "hanging" || part == "each-line")
    });
    register(&["text-overflow"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 2, |part| part == "clip" || part == "ellipsis" || is_quoted(part))
    });
    register(&["text-combine-upright"], |v| {
        keyword(v, &["none", "all", "digits"])
            || v
                .strip_prefix("digits ")
                .is_some_and(|digits| is_integer(digits.trim()))
    });
    register(&["hanging-punctuation"], |v| {
        keyword(v, &["none"])
            || each_component(v, 3, |part| {
                ["first", "force-end", "allow-end", "last"].contains(&part)
            })
    });
    register(&["quotes"], |v| {
        if keyword(v, &["none", "auto"]) {
            return true;
        }
        let marks = components(v);
        !marks.is_empty() && marks.len() % 2 == 0 && marks.iter().all(|mark| is_quoted(mark))
    });
    register(&["text-transform"], |v| {
        keyword(v, &["none", "capitalize", "uppercase", "lowercase", "full-width"])
    });
    register(&["text-orientation"], |v| keyword(v, &["mixed", "upright", "sideways"]));
    register(&["text-justify"], |v| {
        keyword(v, &["auto", "none", "inter-word", "inter-character"])
    });
    register(&["vertical-align"], |v| {
        length_or(
            v,
            &["baseline", "sub", "super", "top", "text-top", "middle", "bottom", "text-bottom"],
        )
    });
    register(&["white-space"], |v| {
        keyword(v, &["normal", "nowrap", "pre", "pre-line", "pre-wrap", "break-spaces"])
    });
    register(&["word-break"], |v| keyword(v, &["normal", "break-all", "keep-all", "break-word"]));
    register(&["word-wrap", "overflow-wrap"], overflow_wrap);
    register(&["line-break"], |v| keyword(v, &["auto", "loose", "normal", "strict", "anywhere"]));
    register(&["hyphens"], |v| keyword(v, &["none", "manual", "auto"]));
    register(&["writing-mode"], |v| keyword(v, &["horizontal-tb", "vertical-rl", "vertical-lr"]));
    register(&["direction"], |v| keyword(v, &["ltr", "rtl"]));
    register(&["unicode-bidi"], |v| {
        keyword(
            v,
            &["normal", "embed", "bidi-override", "isolate", "isolate-override", "plaintext"],
        )
    });
    register(&["tab-size"], |v| is_css_wide_keyword(v) || is_integer(v) || is_length(v));

    // Lists and tables
    register(&["list-style-type"], |v| keyword(v, LIST_STYLE_TYPES));
    register(&["list-style-position"], |v| keyword(v, &["inside", "outside"]));
    register(&["list-style-image"], |v| keyword(v, &["none"]) || is_url(v));
    register(&["list-style"], |v| {
        is_css_wide_keyword(v)
            || each_component(v, 3, |part| {
                LIST_STYLE_TYPES.contains(&part) || part == "inside" || part == "outside" || is_url(part)
            })
    });
    register(&["table-layout"], |v| keyword(v, &["auto", "fixed"]));
    register(&["caption-side"], |v| keyword(v, &["top", "bottom"]));
    register(&["empty-cells"], |v| keyword(v, &["show", "hide"]));

    // Misc
    register(&["cursor"], |v| keyword(v, CURSORS));
    register(&["pointer-events"], |v| keyword(v, &["auto", "none"]));
    register(&["user-select"], |v| keyword(v, &["auto", "none", "text", "all", "contain"]));
    register(&["scroll-behavior"], |v| keyword(v, &["auto", "smooth"]));
    register(&["image-rendering"], |v| {
        keyword(v, &["auto", "smooth", "high-quality", "crisp-edges", "pixelated"])
    });
    register(&["perspective"], |v| length_or(v, &["none"]));
    register(&["transform-style"], |v| keyword(v, &["flat", "preserve-3d"]));
    register(&["transform"], |v| {
        keyword(v, &["none"]) || each_component(v, 16, |part| TRANSFORM_FUNCTION.is_match(part))
    });
    register(&["filter"], |v| {
        keyword(v, &["none"]) || each_component(v, 16, |part| FILTER_FUNCTION.is_match(part))
    });

    map
}

static DEFAULT_VALIDATORS: Lazy<HashMap<&'static str, Validator>> = Lazy::new(validators);

fn deny_all(_: &str) -> bool {
    false
}

/// Whether `property_name` (lowercase, unprefixed) has a built-in validator.
pub fn has_default_handler(property_name: &str) -> bool {
    DEFAULT_VALIDATORS.contains_key(property_name)
}

/// Returns the built-in validator for a property.
///
/// Unknown properties get a handler that rejects every value, so allowing a
/// property without a strategy never opens it up by accident.
pub fn default_handler(property_name: &str) -> StyleHandler {
    let validator = DEFAULT_VALIDATORS
        .get(property_name)
        .copied()
        .unwrap_or(deny_all as Validator);
    Arc::new(validator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(property: &str, value: &str) -> bool {
        default_handler(property)(value)
    }

    #[test]
    fn test_unknown_property_denies_everything() {
        assert!(!has_default_handler("nonexistentstyle"));
        assert!(!accepts("nonexistentstyle", "something"));
        assert!(!accepts("nonexistentstyle", "inherit"));
    }

    #[test]
    fn test_keyword_properties() {
        assert!(accepts("align-content", "center"));
        assert!(accepts("text-align", "center"));
        assert!(accepts("background-origin", "padding-box"));
        assert!(!accepts("background-origin", "invalidvalue"));
        assert!(accepts("all", "initial"));
        assert!(!accepts("all", "none"));
    }

    #[test]
    fn test_colors() {
        assert!(accepts("color", "red"));
        assert!(accepts("color", "#f00"));
        assert!(accepts("color", "rgb(255, 0, 0)"));
        assert!(accepts("background-color", "transparent"));
        assert!(!accepts("color", "#f00ba"));
        assert!(!accepts("color", "expression(alert(1))"));
    }

    #[test]
    fn test_urls_must_be_http() {
        assert!(accepts("background-image", "url('http://paper.gif')"));
        assert!(accepts("background-image", "none"));
        assert!(!accepts("background-image", "url(javascript:alert('xss'))"));
        assert!(!accepts("background-image", "url('data:image/png;base64,aaaa')"));
        assert!(!accepts("list-style-image", "url(\"javascript:alert(1)\")"));
    }

    #[test]
    fn test_shorthands() {
        assert!(accepts("animation", "mymove 5s infinite"));
        assert!(accepts("animation-timing-function", "cubic-bezier(1,1,1,1)"));
        assert!(accepts("animation-timing-function", "steps(2, start)"));
        assert!(accepts(
            "background",
            "lightblue url('https://img_tree.gif') no-repeat fixed center"
        ));
        assert!(accepts("border", "1px solid #000"));
        assert!(accepts("margin", "0 auto"));
        assert!(!accepts("margin", "1px 2px 3px 4px 5px"));
        assert!(accepts("font", "italic bold 12px/30px georgia, serif"));
    }

    #[test]
    fn test_numeric_properties() {
        assert!(accepts("z-index", "-1"));
        assert!(accepts("z-index", "auto"));
        assert!(!accepts("z-index", "1.5"));
        assert!(accepts("opacity", "0.5"));
        assert!(accepts("width", "50%"));
        assert!(accepts("animation-delay", "2s"));
        assert!(!accepts("animation-delay", "2"));
    }

    #[test]
    fn test_border_image() {
        assert!(accepts("border-image", "url(https://border.png) 30 round"));
        assert!(accepts("border-image-source", "url(https://border.png)"));
        assert!(accepts("border-image-slice", "30%"));
        assert!(accepts("border-image-slice", "fill"));
        assert!(accepts("border-image-slice", "10% 20 fill"));
        assert!(!accepts("border-image-slice", "3% 3% 3% 3% 3%"));
        assert!(accepts("border-image-repeat", "repeat"));
        assert!(!accepts("border-image-source", "url(javascript:void(0))"));
    }

    #[test]
    fn test_grid() {
        assert!(accepts("grid", "150px / auto auto auto"));
        assert!(accepts("grid-template", "none"));
        assert!(!accepts("grid-template", "a / a / a"));
        assert!(accepts("grid-template-columns", "1fr minmax(100px, 1fr) auto"));
        assert!(!accepts("grid-template-rows", "aaaa aaaaa"));
        assert!(accepts("grid-area", "2 / 1 / span 2 / span 3"));
        assert!(!accepts("grid-area", "1 / 2 / 3 / 4 / 5"));
        assert!(accepts("grid-column-end", "span 2"));
        assert!(!accepts("grid-row-start", "1 / 2"));
        assert!(accepts("grid-template-areas", "'header header' 'main side'"));
        assert!(accepts("grid-gap", "1px 2px"));
        assert!(!accepts("grid-gap", "1px 1px 1px"));
    }

    #[test]
    fn test_shadow_needs_two_lengths() {
        assert!(accepts("box-shadow", "10px 10px #888888"));
        assert!(accepts("text-shadow", "1px 1px 2px black, 0 0 1em red"));
        assert!(accepts("box-shadow", "inset 0 0 4px 1px red"));
        assert!(!accepts("box-shadow", "10px"));
        assert!(!accepts("box-shadow", "10px aa"));
        assert!(!accepts("box-shadow", "10px 10px aa"));
        assert!(!accepts("box-shadow", "10px 10px red blue"));
    }

    #[test]
    fn test_radius_and_positions() {
        assert!(accepts("border-radius", "25px"));
        assert!(accepts("border-radius", "10px 5% / 20px"));
        assert!(!accepts("border-radius", "1px 1px 1px 1px 1px"));
        assert!(!accepts("border-radius", "1px / 2px / 3px"));
        assert!(!accepts("border-radius", "/ 2px"));
        assert!(accepts("object-position", "5px 10%"));
        assert!(!accepts("object-position", "5px 10% 5px"));
        assert!(accepts("transform-origin", "left top 10px"));
        assert!(accepts("background-position", "left 10px top 5px, center"));
    }

    #[test]
    fn test_quoted_values() {
        assert!(accepts("quotes", "'\u{2039}' '\u{203a}'"));
        assert!(accepts("quotes", "'\"' '\"' '<' '>'"));
        assert!(!accepts("quotes", "'a'"));
        assert!(accepts("text-overflow", "'something'"));
        assert!(accepts("text-overflow", "clip ellipsis"));
        assert!(!accepts("text-overflow", "something"));
        assert!(accepts("font-language-override", "'trk'"));
        assert!(accepts("text-combine-upright", "digits 2"));
        assert!(!accepts("text-combine-upright", "digits two"));
    }

    #[test]
    fn test_split_top_level_keeps_functions_whole() {
        assert_eq!(
            components("rgb(1, 2, 3) url('a b') solid"),
            vec!["rgb(1, 2, 3)", "url('a b')", "solid"]
        );
        assert_eq!(components("'a b' \"c d\""), vec!["'a b'", "\"c d\""]);
        assert_eq!(split_outside_nesting("a / / b", |c| c == '/'), vec!["a", "", "b"]);
    }
}
