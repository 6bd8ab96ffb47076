use crate::output::print_json;
use anyhow::Context;
use forge_core::slug::{unique_slug, validate_slug};
use serde::Serialize;

#[derive(Serialize)]
struct SlugReport<'a> {
    input: &'a str,
    slug: &'a str,
}

pub fn run(words: &[String], check: bool, taken: &[String], json: bool) -> anyhow::Result<()> {
    let input = words.join(" ");

    if check {
        validate_slug(&input)?;
        if json {
            print_json(&SlugReport {
                input: &input,
                slug: &input,
            })?;
        } else {
            println!("ok: {input}");
        }
        return Ok(());
    }

    let slug = unique_slug(&input, |s| taken.iter().any(|t| t == s))
        .with_context(|| format!("nothing to slugify in '{input}'"))?;

    if json {
        print_json(&SlugReport {
            input: &input,
            slug: &slug,
        })?;
    } else {
        println!("{slug}");
    }
    Ok(())
}
