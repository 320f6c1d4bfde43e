use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

// ---
// Adaptador de storage: conexão com retry
// ---
// Falha transitória de conexão é a ÚNICA categoria re-tentada; erros de
// regra de negócio sobem direto para o chamador sem retry.
pub async fn connect_with_retry(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    const MAX_ATTEMPTS: u32 = 5;

    let mut attempt = 0u32;
    let mut delay = Duration::from_millis(200);

    loop {
        let result = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await;

        match result {
            Ok(pool) => return Ok(pool),
            Err(err) => {
                attempt += 1;
                if attempt >= MAX_ATTEMPTS {
                    return Err(err);
                }
                tracing::warn!(
                    "Falha ao conectar ao banco (tentativa {}/{}): {}. Nova tentativa em {:?}",
                    attempt,
                    MAX_ATTEMPTS,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                // Backoff exponencial simples
                delay *= 2;
            }
        }
    }
}
