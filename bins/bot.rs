use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // 提前加载 .env，使得 RUST_LOG / DISCORD_TOKEN 等环境变量生效
    dotenv().ok();

    // 配置决定日志格式，因此先加载配置，失败时使用默认日志输出错误
    let cfg = bot::startup::load_config();
    let json_logs = cfg.as_ref().map(|c| c.logging.json).unwrap_or(false);
    common::utils::logging::init_logging(json_logs);
    info!(service = "bot", event = "logger_init", "tracing subscriber initialized");

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "bot", event = "config_invalid", error = %e, "cannot start without a valid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    // 基础服务上下文（不含敏感信息）
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志，便于排查问题
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "bot",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "bot", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "bot", event = "start", %service_id, pid, version, "vouch bot starting");

    // 在独立任务中运行 bot，并监听 Ctrl+C
    rt.block_on(async move {
        let bot_task = tokio::spawn(async move {
            if let Err(e) = bot::run(cfg).await {
                error!(service = "bot", event = "run_failed", error = %e, "bot::run returned error");
                Err(e)
            } else {
                Ok(())
            }
        });

        tokio::select! {
            res = bot_task => {
                match res {
                    Ok(Ok(())) => {
                        info!(service = "bot", event = "stop", %service_id, pid, "bot stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    // 错误已在上面记录
                    Ok(Err(_)) => std::process::ExitCode::FAILURE,
                    Err(e) => {
                        error!(service = "bot", event = "task_join_error", error = %e, "bot task join error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "bot", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                // 每次修改都已同步写入文件，直接退出不会丢失数据
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
