//! # 美化输出工具
//!
//! 提供统一的终端输出样式，`[OK]`/`[*]`/`[WARN]`/`[ERR]` 前缀。
//! `Reporter` 在 `--quiet` 时屏蔽提示性输出，错误始终输出。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 可静默的终端输出
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn header(&self, title: &str) {
        if !self.quiet {
            print_header(title);
        }
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            print_info(msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            print_success(msg);
        }
    }

    /// 输出表格或其他预格式化文本
    pub fn block(&self, text: &str) {
        if !self.quiet {
            println!("{}", text);
        }
    }
}
