mod gracefullshutdown;
mod logs;
mod metrics;
mod observe;
mod otel;
mod random_string;
mod slug;
mod template;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::observe::ServiceObserver;
pub use self::otel::{Telemetry, TracingContext};
pub use self::random_string::{generate_order_code, generate_otp, generate_slug_suffix};
pub use self::slug::slugify;
pub use self::template::{EmailTemplate, EmailTemplateData, render_email};
