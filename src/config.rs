// src/config.rs

use anyhow::Context;
use chrono_tz::Tz;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, DashboardRepository, OrderRepository},
    services::{
        catalog_service::CatalogService, dashboard_service::DashboardService,
        order_service::OrderService,
    },
};

const DEFAULT_TIMEZONE: &str = "Asia/Ho_Chi_Minh";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
// Cada requisição do dashboard dispara 11 leituras em paralelo
// (8 do resumo + 3 gráficos); a pool precisa ficar acima disso.
const DEFAULT_MAX_CONNECTIONS: u32 = 16;

// Configurações lidas do ambiente (.env opcional)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub business_timezone: Tz,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let timezone_name =
            env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let business_timezone = parse_timezone(&timezone_name)?;

        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{raw}'"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            business_timezone,
            max_connections,
        })
    }
}

fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("BUSINESS_TIMEZONE inválido '{name}': {e}"))
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_service: CatalogService,
    pub order_service: OrderService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_service = CatalogService::new(CatalogRepository::new());
        let order_service =
            OrderService::new(OrderRepository::new(), settings.business_timezone);
        let dashboard_service = DashboardService::new(
            DashboardRepository::new(db_pool.clone()),
            settings.business_timezone,
        );

        Ok(Self {
            db_pool,
            catalog_service,
            order_service,
            dashboard_service,
        })
    }
}
