/// End-to-end MCP sessions driven through in-memory pipes
use chrono::NaiveDate;
use habit_streak_mcp::*;
use serde_json::{json, Value};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
}

/// A server over a fresh in-memory store holding one daily habit
fn seeded_server() -> (HabitTrackerServer, HabitId) {
    let storage = MemoryStorage::new();
    let habit = Habit::new(
        "Read".to_string(),
        Some("20 pages".to_string()),
        Frequency::Daily,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )
    .unwrap();
    storage.create_habit(&habit).unwrap();
    storage
        .create_completion(&Completion::new(habit.id, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()))
        .unwrap();

    (HabitTrackerServer::new(Box::new(storage), Clock::Fixed(today())), habit.id)
}

/// Feed request lines to a server and collect its response lines
async fn run_session(server: HabitTrackerServer, requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.expect("session failed");

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, tool: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": tool, "arguments": arguments}
    })
}

/// Decode the JSON text payload of a successful tool result
fn tool_payload(response: &Value) -> Value {
    assert_eq!(response["result"]["isError"], false, "unexpected response: {}", response);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_handshake_and_tool_listing() {
    let (server, _) = seeded_server();
    let responses = run_session(
        server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0"}
            }}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
        ],
    )
    .await;

    // The notification gets no reply
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(responses[0]["result"]["capabilities"]["tools"]["listChanged"], false);

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["habit_list", "habit_get", "habit_create", "habit_update", "habit_delete", "habit_toggle"]
    );
    let create = &tools[2]["inputSchema"];
    assert_eq!(create["type"], "object");
    assert!(create["properties"]["frequency"].is_object());
    let toggle_description = tools[5]["description"].as_str().unwrap();
    assert!(toggle_description.contains("Only today's date is flipped"));
    assert!(toggle_description.contains("weekly habits"));

    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn test_toggle_round_trip() {
    let (server, habit_id) = seeded_server();
    let id = habit_id.to_string();
    let responses = run_session(
        server,
        &[
            call(1, "habit_toggle", json!({"habit_id": id})),
            call(2, "habit_get", json!({"habit_id": id})),
            call(3, "habit_toggle", json!({"habit_id": id})),
        ],
    )
    .await;

    let toggled = tool_payload(&responses[0]);
    assert_eq!(toggled["completed"], true);
    assert_eq!(toggled["currentStreak"], 2);
    assert_eq!(toggled["completedToday"], true);
    assert_eq!(toggled["message"], "Read completed! Current streak: 2 days.");
    assert!(toggled.get("milestone").is_none());

    let fetched = tool_payload(&responses[1]);
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["createdAt"], "2024-03-01");
    assert_eq!(fetched["lastCompletedAt"], "2024-03-13");
    assert_eq!(fetched["totalCompletions"], 2);
    // Tuesday and Wednesday of the week starting Sunday 10th
    assert_eq!(fetched["weeklyProgress"], 29);

    let undone = tool_payload(&responses[2]);
    assert_eq!(undone["completed"], false);
    assert_eq!(undone["currentStreak"], 1);
    assert_eq!(undone["message"], "Read marked as incomplete.");
}

#[tokio::test]
async fn test_create_update_list_delete() {
    let (server, _) = seeded_server();
    let responses = run_session(
        server,
        &[call(1, "habit_create", json!({"name": "Gym", "frequency": "weekly"}))],
    )
    .await;
    let created = tool_payload(&responses[0]);
    assert_eq!(created["frequency"], "weekly");
    assert_eq!(created["currentStreak"], 0);
    assert!(created.get("lastCompletedAt").is_none());

    // Fresh server, same flow end to end
    let (server, _) = seeded_server();
    let responses = run_session(
        server,
        &[
            call(1, "habit_create", json!({"name": "Gym", "frequency": "weekly"})),
            call(2, "habit_list", json!({})),
        ],
    )
    .await;
    let gym_id = tool_payload(&responses[0])["id"].as_str().unwrap().to_string();
    let listed = tool_payload(&responses[1]);
    assert_eq!(listed["habits"].as_array().unwrap().len(), 2);
    assert_eq!(listed["overview"]["totalHabits"], 2);
    assert_eq!(listed["overview"]["activeStreaks"], 1);
    assert_eq!(listed["overview"]["completedToday"], 0);
    assert_eq!(listed["overview"]["todayProgress"], 0);

    let (server, habit_id) = seeded_server();
    let responses = run_session(
        server,
        &[
            call(1, "habit_update", json!({
                "habit_id": habit_id.to_string(),
                "name": "Read more",
                "frequency": "weekly"
            })),
            call(2, "habit_delete", json!({"habit_id": habit_id.to_string()})),
            call(3, "habit_get", json!({"habit_id": habit_id.to_string()})),
            call(4, "habit_delete", json!({"habit_id": gym_id})),
        ],
    )
    .await;

    let updated = tool_payload(&responses[0]);
    assert_eq!(updated["name"], "Read more");
    assert!(updated["description"].is_null());
    // Tuesday's completion now counts for this week
    assert_eq!(updated["currentStreak"], 1);
    assert_eq!(updated["weeklyProgress"], 100);

    assert_eq!(tool_payload(&responses[1]), json!({"success": true}));
    assert_eq!(responses[2]["error"]["code"], -32001);
    // The gym habit only lived in the other session
    assert_eq!(responses[3]["error"]["code"], -32001);
}

#[tokio::test]
async fn test_error_responses() {
    let (server, _) = seeded_server();
    let input = [
        "this is not json".to_string(),
        json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}).to_string(),
        call(3, "habit_fly", json!({})).to_string(),
        call(4, "habit_create", json!({"name": "Nap"})).to_string(),
        call(5, "habit_create", json!({"name": "   ", "frequency": "daily"})).to_string(),
        call(6, "habit_toggle", json!({"habit_id": "not-a-uuid"})).to_string(),
        json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call"}).to_string(),
        json!({"jsonrpc": "2.0", "id": 8}).to_string(),
    ]
    .join("\n");
    let mut output = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let codes: Vec<(Value, i64)> = responses
        .iter()
        .map(|r| (r["id"].clone(), r["error"]["code"].as_i64().unwrap()))
        .collect();

    assert_eq!(
        codes,
        vec![
            (Value::Null, -32700),
            (json!(2), -32601),
            (json!(3), -32601),
            (json!(4), -32602),
            (json!(5), -32003),
            (json!(6), -32001),
            (json!(7), -32602),
            (json!(8), -32600),
        ]
    );
}

#[tokio::test]
async fn test_unknown_method_exact_bytes() {
    let (server, _) = seeded_server();
    let reader = tokio_test::io::Builder::new()
        .read(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"foo\"}\n")
        .build();
    let writer = tokio_test::io::Builder::new()
        .write(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"error\":{\"code\":-32601,\"message\":\"Method 'foo' not found\"}}\n")
        .build();

    server.serve(reader, writer).await.unwrap();
}
