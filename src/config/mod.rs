use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Konfigurace agenta, každá volba jde nastavit i proměnnou prostředí
#[derive(Parser, Debug, Clone)]
#[command(name = "es-metrics-agent")]
#[command(about = "Ships Elasticsearch cluster health and node stats to a monitoring cluster", long_about = None)]
pub struct Args {
    /// Cluster, který se monitoruje
    #[arg(long, env = "ES_METRICS_CLUSTER_URL", default_value = "http://localhost:9200/")]
    pub cluster_url: String,

    /// Cluster, do kterého se zapisují metriky
    #[arg(long, env = "ES_METRICS_MONITORING_CLUSTER_URL", default_value = "http://localhost:9200/")]
    pub monitoring_cluster_url: String,

    /// Prefix denních indexů
    #[arg(long, env = "ES_METRICS_INDEX_NAME", default_value = "monitoring-test")]
    pub index_prefix: String,

    /// Interval sběru v sekundách
    #[arg(
        long,
        env = "ES_METRICS_INTERVAL",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,

    /// Adresář s definicemi index templatů (*.json)
    #[arg(long, env = "ES_METRICS_TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Timeout jednoho HTTP requestu v sekundách
    #[arg(long, env = "ES_METRICS_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Provede jediný cyklus a skončí
    #[arg(long, env = "ES_METRICS_ONCE")]
    pub once: bool,
}

impl Args {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Sestaví konfiguraci procesu po zjištění UUID clusteru
    pub fn into_process_config(self, cluster_uuid: String) -> ProcessConfig {
        ProcessConfig {
            source_url: self.cluster_url,
            monitoring_url: self.monitoring_cluster_url,
            index_prefix: self.index_prefix,
            interval: Duration::from_secs(self.interval),
            cluster_uuid,
        }
    }
}

/// Neměnná konfigurace pro celý běh procesu
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub source_url: String,
    pub monitoring_url: String,
    pub index_prefix: String,
    pub interval: Duration,
    pub cluster_uuid: String,
}
