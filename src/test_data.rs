#[cfg(test)]
use crate::post::Post;

#[cfg(test)]
pub fn make_post(slug: &str, date: &str) -> Post {
    Post {
        slug: slug.to_string(),
        title: format!("Title of {}", slug),
        excerpt: format!("Excerpt of {}", slug),
        date: date.to_string(),
        author: "Jane Doe".to_string(),
        image: format!("/public/{}.jpeg", slug),
        content: vec![format!("Content of {}", slug)],
        category: None,
    }
}

#[cfg(test)]
pub const POSTS_DATA: &str = r##"
[[posts]]
slug = "shopify-theme-customization"
title = "5 Tips for Better Shopify Theme Customization"
excerpt = "Learn how to tweak your Shopify theme for better performance, faster load times, and higher conversions."
date = "2025-08-05"
author = "Jane Doe"
image = "/public/theme-customization.jpeg"
content = [
    "Customizing a Shopify theme should balance brand, speed, and maintainability.",
    "Go section-first: build reusable sections and blocks.",
]

[[posts]]
slug = "cro-for-shopify-stores"
title = "Boost Conversions with Shopify CRO Best Practices"
excerpt = "Conversion Rate Optimization can make a huge difference to your revenue."
date = "2025-07-28"
author = "John Smith"
image = "/public/cro.jpeg"
category = "CRO"
content = [
    "CRO works best as a continuous system: research, hypothesis, experiment, analyze, iterate.",
]

[[posts]]
slug = "shopify-migration-guide"
title = "The Ultimate Guide to Shopify Migration"
excerpt = "Thinking of moving to Shopify from WooCommerce, Magento, or BigCommerce?"
date = "2025-07-10"
author = "Jane Doe"
image = "/public/migration.jpeg"
category = "Guides"
content = [
    "Migrations are risk management: preserve SEO, analytics, and operations.",
]
"##;
