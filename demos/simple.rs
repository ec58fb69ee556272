use s3_sdk_client::create_in_memory_client;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Create a client backed by in-memory storage, with the debug log on
    let client = create_in_memory_client("demo-bucket", true);

    client.put_object("greetings/hello.txt", "Hello, World!").await;

    if let Some(content) = client.get_object("greetings/hello.txt").await {
        println!("Read back: {}", String::from_utf8_lossy(&content));
    }

    println!("Exists: {}", client.is_object_exist("greetings/hello.txt").await);
    println!("Deleted: {}", client.delete_object("greetings/hello.txt").await);
    println!("Check: {}", client.check().await);

    println!("\nDebug log:\n{}", client.logs_as_string());
}
