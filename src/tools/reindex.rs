//! §4.6.12 `reindex()`

use crate::context::ServerContext;

use super::shared::capitalize_words;

pub async fn run(ctx: &ServerContext) -> String {
    let previous_count = ctx.snapshot().await.store.len();

    match ctx.reindex().await {
        Ok((index, stats)) => {
            let new_count = index.store.len();
            let delta = new_count as i64 - previous_count as i64;
            let delta_line = match delta.cmp(&0) {
                std::cmp::Ordering::Greater => format!("{delta} new document(s) discovered."),
                std::cmp::Ordering::Less => format!("{} document(s) removed.", -delta),
                std::cmp::Ordering::Equal => "No change in document count.".to_string(),
            };

            let mut out = format!(
                "## Reindex Complete\n\n{delta_line} {new_count} document(s) indexed in {}ms ({} failed).\n\n",
                stats.duration_ms, stats.failed_files
            );

            out.push_str("### By Module\n\n");
            for (module, count) in &stats.by_module {
                out.push_str(&format!("- {}: {count}\n", capitalize_words(module.as_str())));
            }

            if !stats.by_category.is_empty() {
                out.push_str("\n### By Category\n\n");
                for (category, count) in &stats.by_category {
                    out.push_str(&format!("- {}: {count}\n", capitalize_words(category)));
                }
            }

            out
        }
        Err(err) => format!(
            "**Error:** reindex failed: {err}\n\n\
             Troubleshooting:\n\
             - Verify the configured docs root exists and is readable\n\
             - Check file permissions on the docs directory\n\
             - Confirm the process has not had its working directory changed\n\n\
             The previously indexed document set ({previous_count} document(s)) remains in effect."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn reports_new_document_count_after_adding_a_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("01-foundation")).unwrap();
        fs::write(
            dir.path().join("01-foundation/00-intro.md"),
            "# Intro\n\nHello.\n",
        )
        .unwrap();

        let ctx = ServerContext::new(dir.path().to_path_buf()).unwrap();
        fs::write(
            dir.path().join("01-foundation/01-second.md"),
            "# Second\n\nMore.\n",
        )
        .unwrap();

        let response = run(&ctx).await;
        assert!(response.contains("1 new document(s) discovered."));
        assert!(response.contains("By Module"));
    }

    #[tokio::test]
    async fn missing_root_reports_troubleshooting_and_keeps_old_count() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("00-intro.md"), "# Intro\n\nHello.\n").unwrap();
        let ctx = ServerContext::new(dir.path().to_path_buf()).unwrap();

        std::fs::remove_dir_all(dir.path()).unwrap();
        let response = run(&ctx).await;
        assert!(response.starts_with("**Error:**"));
        assert!(response.contains("Troubleshooting"));
    }
}
