use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::api_types::{ApiPost, ApiSocial, ApiSocialSource};
use crate::error::WidgetError;
use crate::out_models::{SocialPostView, SocialSourceView, SocialTabView};

/// Only these sources are shown in the social tab.
pub const SHOWN_SOURCES: [&str; 2] = ["google.com", "foursquare.com"];

pub fn social_tab(social: &ApiSocial) -> Result<SocialTabView, WidgetError> {
    let sources = social
        .source_list
        .iter()
        .map(social_source)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SocialTabView { sources })
}

fn social_source(source: &ApiSocialSource) -> Result<SocialSourceView, WidgetError> {
    let icon_class = source_icon_class(&source.source_id)?;
    let posts = source
        .post_list
        .iter()
        .filter(|p| SHOWN_SOURCES.contains(&p.source_id.as_str()))
        .map(|p| social_post(p, &icon_class))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SocialSourceView {
        social_source: icon_class,
        posts,
    })
}

fn social_post(post: &ApiPost, icon_class: &str) -> Result<SocialPostView, WidgetError> {
    let user_name = match post.author.as_deref() {
        Some(author) if !author.is_empty() => author.to_string(),
        _ => format!("A {} user", post.source_name),
    };

    Ok(SocialPostView {
        social_source_class: icon_class.to_string(),
        social_source: post.source_name.clone(),
        publish_date: format_post_date(&post.created)?,
        text: post.text.clone(),
        user_name,
    })
}

/// "google.com" -> "google-plus", otherwise the domain label before the TLD.
pub fn source_icon_class(source_id: &str) -> Result<String, WidgetError> {
    if source_id == "google.com" {
        return Ok("google-plus".to_string());
    }
    let labels: Vec<&str> = source_id.split('.').collect();
    labels
        .len()
        .checked_sub(2)
        .map(|i| labels[i].to_string())
        .ok_or_else(|| {
            WidgetError::boundary(format!("social source id '{source_id}' has no domain label"))
        })
}

/// "YYYY-MM-DD" -> "M/D/YYYY". Out-of-range month or day values roll over
/// into the neighbouring month or year instead of being rejected.
pub fn format_post_date(created: &str) -> Result<String, WidgetError> {
    let bad = || WidgetError::boundary(format!("post date '{created}' is not YYYY-MM-DD"));

    let parts: Vec<i64> = created
        .split('-')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| bad())?;
    let &[year, month, day] = parts.as_slice() else {
        return Err(bad());
    };

    let months = year
        .checked_mul(12)
        .and_then(|m| m.checked_add(month.checked_sub(1)?))
        .ok_or_else(bad)?;
    let first_of_month = i32::try_from(months.div_euclid(12))
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, months.rem_euclid(12) as u32 + 1, 1))
        .ok_or_else(bad)?;
    let date = day
        .checked_sub(1)
        .and_then(TimeDelta::try_days)
        .and_then(|offset| first_of_month.checked_add_signed(offset))
        .ok_or_else(bad)?;

    Ok(format!("{}/{}/{}", date.month(), date.day(), date.year()))
}
