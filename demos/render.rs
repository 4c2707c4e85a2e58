//! Render a three-generation pedigree to SVG on stdout.
//!
//! `cargo run --example render --features tracing -- 360` logs the layout
//! pass to stderr and uses a full-circle fan.

use fanchart::{Color, Configuration, Lifespan, PersonRecord, PersonTree, Sex, partition};

fn person(id: u32, first: &str, last: &str, birth: i32) -> PersonRecord {
    PersonRecord::new(id, format!("I{}", id))
        .with_first_names(first)
        .with_last_names(last)
        .with_lifespan(Lifespan {
            birth: Some(birth),
            death: Some(birth + 68),
            deceased: true,
        })
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let fan_degree = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(210.0);

    let father = PersonTree::leaf(
        person(2, "Johann Caspar", "Goethe", 1710)
            .with_sex(Sex::Male)
            .with_marriage("1748")
            .with_color(Color::Rgb(100, 149, 237)),
    )
    .with_children(vec![
        PersonTree::leaf(person(4, "Friedrich Georg", "Göthe", 1657).with_marriage("1705")),
        PersonTree::leaf(person(5, "Cornelia", "Walther", 1668)),
    ]);
    let mother = PersonTree::leaf(
        person(3, "Catharina Elisabeth", "Textor", 1731)
            .with_preferred_name("Elisabeth")
            .with_sex(Sex::Female)
            .with_marriage("1730")
            .with_color(Color::Rgb(255, 182, 193)),
    )
    .with_children(vec![
        PersonTree::leaf(person(6, "Johann Wolfgang", "Textor", 1693)),
        PersonTree::leaf(person(7, "Anna Margaretha", "Lindheimer", 1711)),
    ]);
    let root = partition(
        PersonTree::leaf(
            person(1, "Johann Wolfgang", "von Goethe", 1749)
                .with_preferred_name("Wolfgang")
                .with_alternative_names("יוהאן וולפגנג")
                .with_marriage("1806"),
        )
        .with_children(vec![father, mother]),
    );

    let config = Configuration::default()
        .with_fan_degree(fan_degree)
        .with_color_gradients(true);
    let svg = fanchart::render_svg(&root, config)?;
    println!("{}", svg);
    Ok(())
}
