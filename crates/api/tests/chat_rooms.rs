//! Unit-level tests for the chat room connection manager.

use axum::extract::ws::Message;
use taskup_api::ws::ChatRooms;
use uuid::Uuid;

#[tokio::test]
async fn test_join_broadcast_leave() {
    let rooms = ChatRooms::new();
    let project = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let mut alice_rx = rooms.join(project, "conn-a".into(), alice).await;
    let mut bob_rx = rooms.join(project, "conn-b".into(), bob).await;
    assert_eq!(rooms.connection_count().await, 2);

    rooms
        .broadcast(project, Message::Text("hello".into()))
        .await;
    assert_eq!(alice_rx.recv().await, Some(Message::Text("hello".into())));
    assert_eq!(bob_rx.recv().await, Some(Message::Text("hello".into())));

    rooms.leave(project, "conn-a").await;
    assert_eq!(rooms.connection_count().await, 1);

    rooms
        .broadcast(project, Message::Text("again".into()))
        .await;
    assert_eq!(bob_rx.recv().await, Some(Message::Text("again".into())));
    assert!(
        alice_rx.recv().await.is_none(),
        "departed connection's channel must be closed"
    );
}

#[tokio::test]
async fn test_broadcast_scoped_to_room() {
    let rooms = ChatRooms::new();
    let project_a = Uuid::new_v4();
    let project_b = Uuid::new_v4();
    let user = Uuid::new_v4();

    let mut a_rx = rooms.join(project_a, "conn-a".into(), user).await;
    let mut b_rx = rooms.join(project_b, "conn-b".into(), user).await;

    rooms
        .broadcast(project_a, Message::Text("only-a".into()))
        .await;
    assert_eq!(a_rx.recv().await, Some(Message::Text("only-a".into())));
    assert!(
        b_rx.try_recv().is_err(),
        "other rooms must not receive the broadcast"
    );
}

#[tokio::test]
async fn test_present_users_dedups_connections() {
    let rooms = ChatRooms::new();
    let project = Uuid::new_v4();
    let user = Uuid::new_v4();

    rooms.join(project, "laptop".into(), user).await;
    rooms.join(project, "phone".into(), user).await;

    let present = rooms.present_users(project).await;
    assert_eq!(present, vec![user]);

    rooms.leave(project, "laptop").await;
    assert_eq!(rooms.present_users(project).await, vec![user]);
}
