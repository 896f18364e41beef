/// API сервер предсказания цены автомобиля

use axum::{
    extract::{Form, State},
    http::{Method, StatusCode},
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use carprice_ml::{
    types::{CategoriaResponse, ErrorResponse, PredictionResponse, RawCarForm},
    Predictor,
};

const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Car price predictor</title>
</head>
<body>
    <h1>Car price predictor</h1>
    <form action="/predict" method="post">
        <label>Max power (in bph): <input type="text" name="max_power (in bph)"></label><br>
        <label>Year: <input type="text" name="year"></label><br>
        <label>Km driven: <input type="text" name="km_driven"></label><br>
        <label>Fuel:
            <select name="fuel">
                <option>Diesel</option>
                <option>Petrol</option>
                <option>CNG</option>
                <option>LPG</option>
                <option>Electric</option>
            </select>
        </label><br>
        <button type="submit">Predict</button>
    </form>
</body>
</html>
"#;

#[derive(Clone)]
struct AppState {
    predictor: std::sync::Arc<Predictor>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let model_dir = std::env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);

    // Артефакты загружаются один раз и дальше только читаются
    let predictor = Predictor::load(std::path::Path::new(&model_dir))?;
    tracing::info!(
        "Model artifacts loaded from {}, price model bound to scaled columns {:?}",
        model_dir,
        predictor.price_slots()
    );

    let state = AppState {
        predictor: std::sync::Arc::new(predictor),
    };

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/categoria", post(categoria))
        .layer(cors)
        .with_state(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn home() -> Html<&'static str> {
    Html(FORM_PAGE)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn predict(
    State(state): State<AppState>,
    Form(form): Form<RawCarForm>,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Predict request: {:?}", form);

    match state.predictor.predict_price(&form) {
        Ok(prediction) => {
            tracing::debug!("Prediction: {}", prediction);
            Ok(Json(PredictionResponse { prediction }))
        }
        Err(e) => {
            tracing::error!("Prediction error: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

async fn categoria(
    State(state): State<AppState>,
    Form(form): Form<RawCarForm>,
) -> Result<Json<CategoriaResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Categoria request: {:?}", form);

    match state.predictor.predict_categoria(&form) {
        Ok(categoria) => {
            tracing::debug!("Categoria: {}", categoria);
            Ok(Json(CategoriaResponse { categoria }))
        }
        Err(e) => {
            tracing::error!("Categoria error: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
