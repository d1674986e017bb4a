//! Demo content loaded when the server starts with `--seed`.

use super::Setup;

type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    &'static [&'static str],
);

const ROWS: &[Row] = &[
    (
        "1",
        "Minimalist Developer Paradise",
        "Alex Chen",
        "https://images.unsplash.com/photo-1527689368864-3a821dbccc34?w=800&h=600&fit=crop",
        "Clean lines, natural lighting, and everything I need for productive coding sessions.",
        42,
        &["minimalist", "natural-light", "productivity"],
    ),
    (
        "2",
        "RGB Gaming Battle Station",
        "Jordan Martinez",
        "https://images.unsplash.com/photo-1593640495253-23196b27a87f?w=800&h=600&fit=crop",
        "Triple monitor setup with custom RGB lighting for both work and gaming.",
        89,
        &["gaming", "rgb", "multi-monitor"],
    ),
    (
        "3",
        "Cozy Home Office Corner",
        "Sarah Johnson",
        "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&h=600&fit=crop",
        "Warm and inviting workspace in the corner of my living room.",
        27,
        &["cozy", "home-office", "plants"],
    ),
    (
        "4",
        "Industrial Standing Desk",
        "Mike Thompson",
        "https://images.unsplash.com/photo-1551836022-deb4988cc6c0?w=800&h=600&fit=crop",
        "Height-adjustable desk with industrial design and plenty of storage.",
        56,
        &["standing-desk", "industrial", "storage"],
    ),
    (
        "5",
        "Creative Designer's Haven",
        "Emma Rodriguez",
        "https://images.unsplash.com/photo-1541746972996-4e0b0f93e586?w=800&h=600&fit=crop",
        "Inspiring workspace with art supplies, dual monitors, and creative chaos.",
        73,
        &["creative", "art", "designer"],
    ),
    (
        "6",
        "Scandinavian Simplicity",
        "Lars Andersson",
        "https://images.unsplash.com/photo-1586617420803-97269ccc6b94?w=800&h=600&fit=crop",
        "Clean Scandinavian design with natural wood and white accents.",
        38,
        &["scandinavian", "wood", "simple"],
    ),
    (
        "7",
        "Tech Enthusiast Command Center",
        "David Kim",
        "https://images.unsplash.com/photo-1547036967-23d11aacaee0?w=800&h=600&fit=crop",
        "Multiple screens, mechanical keyboards, and all the latest tech gear.",
        94,
        &["tech", "mechanical-keyboard", "command-center"],
    ),
    (
        "8",
        "Vintage Writer's Desk",
        "Rachel Green",
        "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&h=600&fit=crop",
        "Classic wooden desk with vintage typewriter and leather chair.",
        31,
        &["vintage", "writing", "classic"],
    ),
    (
        "9",
        "Mobile Developer Setup",
        "Carlos Silva",
        "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800&h=600&fit=crop",
        "Compact laptop setup perfect for working from anywhere.",
        45,
        &["mobile", "laptop", "portable"],
    ),
    (
        "10",
        "Plant-Filled Productivity Zone",
        "Maya Patel",
        "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&h=600&fit=crop",
        "Surrounded by greenery for a calming and productive work environment.",
        67,
        &["plants", "green", "productivity"],
    ),
    (
        "11",
        "Ultrawide Monitor Paradise",
        "Ryan Brooks",
        "https://images.unsplash.com/photo-1527689368864-3a821dbccc34?w=800&h=600&fit=crop",
        "Single ultrawide monitor for immersive coding and design work.",
        82,
        &["ultrawide", "immersive", "single-monitor"],
    ),
    (
        "12",
        "Basement Dev Cave",
        "Tom Wilson",
        "https://images.unsplash.com/photo-1593640495253-23196b27a87f?w=800&h=600&fit=crop",
        "Cozy basement setup with mood lighting and comfortable seating.",
        29,
        &["basement", "cozy", "mood-lighting"],
    ),
];

/// The demo setups, ids `"1"` through `"12"`, in display order.
pub fn mock_setups() -> Vec<Setup> {
    ROWS.iter()
        .map(
            |&(id, title, author, image_url, description, likes, tags)| Setup {
                id: id.to_string(),
                title: title.to_string(),
                author: author.to_string(),
                image_url: image_url.to_string(),
                description: Some(description.to_string()),
                likes,
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        )
        .collect()
}
