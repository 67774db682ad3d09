use super::IFavoriteRepo;
use chrono::{DateTime, SecondsFormat, Utc};
use event_reminders_domain::{parse_event_date, Favorite, ReminderWindow};
use sqlx::{FromRow, PgPool};

pub struct PostgresFavoriteRepo {
    pool: PgPool,
}

impl PostgresFavoriteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FavoriteRaw {
    favorite_uid: String,
    user_uid: Option<String>,
    event_name: Option<String>,
    event_date: Option<DateTime<Utc>>,
}

impl From<FavoriteRaw> for Favorite {
    fn from(raw: FavoriteRaw) -> Self {
        Self {
            id: raw.favorite_uid,
            user_id: raw.user_uid,
            event_name: raw.event_name,
            event_date: raw
                .event_date
                .map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

#[async_trait::async_trait]
impl IFavoriteRepo for PostgresFavoriteRepo {
    async fn insert(&self, favorite: &Favorite) -> anyhow::Result<()> {
        // The column is typed so the date has to be valid before it is written
        let event_date = favorite.event_date().map(parse_event_date).transpose()?;
        sqlx::query(
            r#"
            INSERT INTO favorites(favorite_uid, user_uid, event_name, event_date)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(&favorite.id)
        .bind(&favorite.user_id)
        .bind(&favorite.event_name)
        .bind(event_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, favorite_id: &str) -> Option<Favorite> {
        sqlx::query_as::<_, FavoriteRaw>(
            r#"
            DELETE FROM favorites AS f
            WHERE f.favorite_uid = $1
            RETURNING *
            "#,
        )
        .bind(favorite_id)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|favorite| favorite.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, FavoriteRaw>(
            r#"
            SELECT * FROM favorites
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites.into_iter().map(|f| f.into()).collect())
    }

    async fn find_in_window(&self, window: &ReminderWindow) -> anyhow::Result<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, FavoriteRaw>(
            r#"
            SELECT * FROM favorites AS f
            WHERE f.event_date > $1 AND
            f.event_date <= $2
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites.into_iter().map(|f| f.into()).collect())
    }
}
