use mock_server::Fixtures;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    // Same collection sizes as jsonplaceholder.typicode.com.
    mock_server::run(listener, Fixtures::sample(100, 10, 500, 200)).await
}
