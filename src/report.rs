//! Report rendering - HTML batch report and valid-token export
//!
//! Presentation only: consumes the finished `AccountRecord` list and
//! `Statistics`, never feeds back into the pipeline.

use crate::error::{AppError, AppResult};
use crate::models::{AccountRecord, AccountStatus};
use crate::stats::Statistics;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Render the full HTML report
pub fn render_report(
    records: &[AccountRecord],
    stats: &Statistics,
    title: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut rows = String::new();
    for record in records {
        rows.push_str(&render_row(record));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <style>
        body {{ font-family: "Segoe UI", Tahoma, Geneva, Verdana, sans-serif; margin: 20px; background-color: #121212; color: #e0e0e0; }}
        .container {{ max-width: 1600px; margin: 0 auto; background-color: #1e1e1e; padding: 25px; border-radius: 12px; }}
        h1 {{ color: #00bcd4; text-align: center; border-bottom: 2px solid #00bcd4; padding-bottom: 10px; }}
        .summary {{ background: linear-gradient(135deg, #1f2937, #111827); padding: 20px; border-radius: 10px; margin: 20px 0; }}
        .summary h2 {{ margin-top: 0; color: #00bcd4; text-align: center; }}
        .summary-grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 15px; }}
        .summary-item {{ background-color: #2a2a2a; padding: 15px; border-radius: 8px; text-align: center; }}
        .summary-value {{ font-size: 24px; font-weight: bold; color: #00e676; }}
        .summary-label {{ font-size: 13px; color: #aaa; }}
        table {{ width: 100%; border-collapse: collapse; margin: 20px 0; font-size: 13px; }}
        th, td {{ padding: 10px 8px; text-align: left; }}
        th {{ background-color: #00bcd4; color: #fff; font-size: 12px; }}
        tr:nth-child(even) {{ background-color: #2a2a2a; }}
        tr:nth-child(odd) {{ background-color: #242424; }}
        tr:hover {{ background-color: #333333; }}
        .status-valid {{ color: #00e676; font-weight: bold; }}
        .status-invalid {{ color: #ff5252; font-weight: bold; }}
        .status-expired {{ color: #ff9800; font-weight: bold; }}
        .status-error {{ color: #ffc107; font-weight: bold; }}
        .ban-yes {{ color: #ff5252; font-weight: bold; }}
        .ban-no {{ color: #00e676; }}
        .claim-valid {{ color: #00e676; font-weight: bold; }}
        .claim-invalid {{ color: #ff5252; font-weight: bold; }}
        .claim-na {{ color: #9e9e9e; }}
        .account-number {{ font-weight: bold; color: #03a9f4; }}
        .header-section p {{ color: #bbb; margin: 5px 0; text-align: center; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header-section">
            <h1>{title}</h1>
            <p>Generated on: {generated}</p>
        </div>
        <div class="summary">
            <h2>Summary Statistics</h2>
            <div class="summary-grid">
                {summary}
            </div>
        </div>
        <table>
            <thead>
                <tr>
                    <th>#</th><th>Status</th><th>SteamID</th><th>Username</th><th>Real Name</th>
                    <th>VAC</th><th>Community</th><th>Economy</th><th>VAC Count</th>
                    <th>Created</th><th>Last Online</th><th>Expires</th>
                    <th>Token Valid</th><th>Token Expired</th><th>Profile</th>
                </tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
    </div>
</body>
</html>
"#,
        title = escape(title),
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
        summary = render_summary(stats),
        rows = rows,
    )
}

/// Write the HTML report to disk
pub fn write_report(
    path: &Path,
    records: &[AccountRecord],
    stats: &Statistics,
    title: &str,
) -> AppResult<()> {
    let html = render_report(records, stats, title, Utc::now());
    std::fs::write(path, html)
        .map_err(|e| AppError::Report(format!("cannot write {}: {}", path.display(), e)))?;
    tracing::info!(file = %path.display(), "HTML report saved");
    Ok(())
}

/// Export every valid credential with a known identifier for later use
pub fn export_valid_tokens(path: &Path, records: &[AccountRecord]) -> AppResult<usize> {
    let entries: Vec<serde_json::Value> = records
        .iter()
        .filter(|r| r.status == AccountStatus::Valid && r.steam_id.is_some())
        .map(|r| {
            serde_json::json!({
                "steam_id": r.steam_id,
                "username": r.username,
                "status": r.status.to_string(),
                "vac_banned": r.bans.vac_banned,
                "community_banned": r.bans.community_banned,
                "account_created": format_timestamp(r.profile.created_at),
                "expires": expires_text(r),
                "profile_url": r.profile.profile_url,
            })
        })
        .collect();

    let count = entries.len();
    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::Report(format!("cannot write {}: {}", path.display(), e)))?;
    tracing::info!(count, file = %path.display(), "Valid tokens exported");
    Ok(count)
}

fn render_summary(stats: &Statistics) -> String {
    let items = [
        (stats.total, "Total Accounts"),
        (stats.valid, "Valid Accounts"),
        (stats.invalid, "Invalid Accounts"),
        (stats.expired, "Expired Tokens"),
        (stats.claim_valid, "Valid Tokens"),
        (stats.vac_banned, "VAC Banned"),
        (stats.community_banned, "Community Banned"),
        (stats.economy_banned, "Economy Banned"),
    ];
    items
        .iter()
        .map(|(value, label)| {
            format!(
                r#"<div class="summary-item"><div class="summary-value">{}</div><div class="summary-label">{}</div></div>"#,
                value, label
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ")
}

fn render_row(record: &AccountRecord) -> String {
    let steam_id = match (&record.steam_id, record.evaluation_failed) {
        (Some(id), _) => id.clone(),
        (None, true) => "Error".to_string(),
        (None, false) => "Unknown".to_string(),
    };

    let (vac, community, created, last_online) = if record.evaluation_failed {
        (
            "Error".to_string(),
            "Error".to_string(),
            "Error".to_string(),
            "Error".to_string(),
        )
    } else {
        (
            yes_no(record.bans.vac_banned),
            yes_no(record.bans.community_banned),
            format_timestamp(record.profile.created_at),
            format_timestamp(record.profile.last_seen_at),
        )
    };

    let profile_link = if record.profile.profile_url.is_empty() {
        "N/A".to_string()
    } else {
        format!(
            r#"<a href="{}" target="_blank">View</a>"#,
            escape(&record.profile.profile_url)
        )
    };

    format!(
        "                <tr>\n                    \
         <td class=\"account-number\">{}</td>\n                    \
         <td class=\"{}\">{}</td>\n                    \
         <td>{}</td>\n                    \
         <td>{}</td>\n                    \
         <td>{}</td>\n                    \
         <td class=\"{}\">{}</td>\n                    \
         <td class=\"{}\">{}</td>\n                    \
         <td class=\"{}\">{}</td>\n                    \
         <td>{}</td>\n                    \
         <td>{}</td>\n                    \
         <td>{}</td>\n                    \
         <td>{}</td>\n                    \
         <td class=\"{}\">{}</td>\n                    \
         <td class=\"{}\">{}</td>\n                    \
         <td>{}</td>\n                </tr>\n",
        record.index,
        status_class(record.status),
        escape(&record.status.to_string()),
        escape(&steam_id),
        escape(&record.username),
        escape(&record.real_name),
        ban_class(&vac),
        escape(&vac),
        ban_class(&community),
        escape(&community),
        economy_class(&record.bans.economy_ban_status),
        escape(&record.bans.economy_ban_status),
        record.bans.vac_ban_count,
        escape(&created),
        escape(&last_online),
        escape(&expires_text(record)),
        claim_class(record.claim_valid, record.evaluation_failed),
        claim_text(record.claim_valid, record.evaluation_failed),
        claim_class(record.claim_expired, record.evaluation_failed),
        claim_text(record.claim_expired, record.evaluation_failed),
        profile_link,
    )
}

fn status_class(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Valid => "status-valid",
        AccountStatus::Expired => "status-expired",
        AccountStatus::Error => "status-error",
        _ => "status-invalid",
    }
}

fn ban_class(display: &str) -> &'static str {
    if display == "Yes" {
        "ban-yes"
    } else {
        "ban-no"
    }
}

fn economy_class(status: &str) -> &'static str {
    match status.trim().to_lowercase().as_str() {
        "none" | "no_data" | "error" | "invalid_id" | "no_steamid" => "ban-no",
        _ => "ban-yes",
    }
}

fn claim_text(flag: Option<bool>, failed: bool) -> &'static str {
    if failed {
        return "Error";
    }
    match flag {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "N/A",
    }
}

fn claim_class(flag: Option<bool>, failed: bool) -> &'static str {
    if failed {
        return "claim-na";
    }
    match flag {
        Some(true) => "claim-valid",
        Some(false) => "claim-invalid",
        None => "claim-na",
    }
}

fn expires_text(record: &AccountRecord) -> String {
    if record.evaluation_failed {
        return "Error".to_string();
    }
    match record.expires_at {
        Some(ts) => format_timestamp(ts),
        None => "Unknown/No Expire".to_string(),
    }
}

/// Epoch seconds to a display string; zero and negatives read as "Never"
pub fn format_timestamp(ts: i64) -> String {
    if ts <= 0 {
        return "Never".to_string();
    }
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "Never".to_string(),
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
