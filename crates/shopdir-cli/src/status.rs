//! Opening-hours commands: current status and the weekly schedule.

use chrono::{DateTime, Utc};
use shopdir_core::{evaluate_status, format_working_hours, ShopRecord, TimeContext};

use crate::source::ShopSource;

/// Print whether one shop, or every shop, is open at `at`.
///
/// # Errors
///
/// Returns an error if the shop cannot be found or the source fails.
pub(crate) async fn run_status(
    source: &ShopSource,
    shop_id: Option<&str>,
    at: DateTime<Utc>,
    ctx: TimeContext,
) -> anyhow::Result<()> {
    let shops = match shop_id {
        Some(id) => vec![source.find(id).await?],
        None => source.all().await?,
    };

    if shops.is_empty() {
        println!("no shops listed");
        return Ok(());
    }

    println!("{:<10}{:<28}{:<8}MESSAGE", "ID", "NAME", "STATUS");
    for shop in &shops {
        println!("{}", status_line(shop, at, ctx));
    }

    Ok(())
}

/// Print a shop's weekly schedule and its status at `now`.
///
/// # Errors
///
/// Returns an error if the shop cannot be found or the source fails.
pub(crate) async fn run_hours(
    source: &ShopSource,
    shop_id: &str,
    now: DateTime<Utc>,
    ctx: TimeContext,
) -> anyhow::Result<()> {
    let shop = source.find(shop_id).await?;
    let status = evaluate_status(&shop.opening_hours, now, ctx);

    println!("{}", shop.name);
    if !shop.address.is_empty() {
        println!("{}", shop.address);
    }
    println!("Hours: {}", format_working_hours(&shop.opening_hours));
    println!("Now ({ctx}): {}", status.message);

    Ok(())
}

fn status_line(shop: &ShopRecord, at: DateTime<Utc>, ctx: TimeContext) -> String {
    let status = evaluate_status(&shop.opening_hours, at, ctx);
    let flag = if status.is_open { "OPEN" } else { "CLOSED" };
    format!("{:<10}{:<28}{:<8}{}", shop.id, shop.name, flag, status.message)
}
