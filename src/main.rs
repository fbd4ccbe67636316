use anyhow::Result;

use conlog::{log_info, log_item, log_warn, ColorMode, Highlight, LogContext, Logger, Priority};

fn main() -> Result<()> {
    // The logger is an explicitly owned service object; construct it once
    // at the entry point and hand out references.
    let logger = Logger::new();

    // Console mode (the default): colorized output, one write per record
    log_warn!(logger, "starting demo, pid {}", std::process::id());
    log_item!(logger, Priority::Warn, Highlight::Mark, "marked line");
    log_item!(logger, Priority::Critical, Highlight::Key, "key alert");

    // Switch to batched file output
    let file_path = std::env::temp_dir().join("conlog-demo.log");
    let ctx = LogContext {
        level: Priority::Debug,
        color: ColorMode::ByProcess,
        screen: false,
        rotate: false,
        file_path: file_path.clone(),
    };
    logger.set_context(&ctx);

    for i in 0..5 {
        log_info!(logger, "batched record {}", i);
    }
    logger.flush();

    println!("batched records written to {}", file_path.display());
    Ok(())
}
