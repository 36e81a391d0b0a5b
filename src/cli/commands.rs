use crate::app::{AppContext, Result};
use crate::stages::{self, Stage};

pub async fn run_stages(ctx: &AppContext, stages: &[Stage]) -> Result<()> {
    for &stage in stages {
        println!("Stage {}: {}", stage.number(), stage.description());
        run_stage(ctx, stage).await?;
    }

    if stages.len() > 1 {
        println!("All stages complete");
    }
    Ok(())
}

pub async fn run_stage(ctx: &AppContext, stage: Stage) -> Result<()> {
    let paths = &ctx.config.paths;

    match stage {
        Stage::Capture => {
            match stages::capture::capture(paths, &ctx.normalizer, &ctx.writer) {
                Some(summary) => {
                    println!("  Captured {} entries", summary.entries);
                    if !summary.written {
                        eprintln!("  ownsource could not be written, see the _log.txt dump");
                    }
                }
                None => println!("  Nothing to capture"),
            }
        }
        Stage::Combine => {
            let summary = stages::combine::combine_sources(ctx).await?;
            println!(
                "  {} subscriptions ({} failed), {} network entries",
                summary.subscriptions, summary.failed_subscriptions, summary.network_entries
            );
            if !summary.network_trusted {
                eprintln!("  Network entries excluded: netsource could not be written");
            }
            if !summary.merged_written {
                eprintln!("  allsource could not be written, see the _log.txt dump");
            }
            println!("  {} entries in {}", summary.merged_entries, paths.all_source.display());
        }
        Stage::Clean => {
            let summary = stages::clean::clean(paths)?;
            println!("  Kept {} of {} lines", summary.kept, summary.total);
        }
        Stage::Split => {
            let summary = stages::split::split(paths, &ctx.writer);
            println!(
                "  {} channel files, {} entries",
                summary.channels_written, summary.entries_written
            );
        }
        Stage::Pick => {
            let summary = stages::pick::pick(paths)?;
            println!(
                "  {} channels picked, {} sources kept",
                summary.channels, summary.lines_kept
            );
        }
        Stage::Result => match stages::result::render(paths)? {
            Some(summary) => println!(
                "  {} replacements written to {}",
                summary.replaced,
                paths.final_result.display()
            ),
            None => println!("  No user template, nothing rendered"),
        },
    }

    Ok(())
}
