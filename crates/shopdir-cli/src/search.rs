use shopdir_core::{approved_only, search_shops};

use crate::source::ShopSource;

/// Print shops whose name or description matches `query`.
///
/// # Errors
///
/// Returns an error if the shop source fails.
pub(crate) async fn run_search(
    source: &ShopSource,
    query: &str,
    only_approved: bool,
) -> anyhow::Result<()> {
    let mut shops = source.all().await?;
    if only_approved {
        shops = approved_only(shops);
    }

    let matches = search_shops(&shops, query);
    if matches.is_empty() {
        println!("no shops match '{query}'");
        return Ok(());
    }

    println!("{:<10}{:<28}CATEGORIES", "ID", "NAME");
    for shop in matches {
        println!("{:<10}{:<28}{}", shop.id, shop.name, shop.categories.join(", "));
    }

    Ok(())
}
