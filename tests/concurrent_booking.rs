//! 文件型 SQLite 上的并发预约：同一课时只有一个请求成功，其余返回 Conflict

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use linklearn::config::DatabaseConfig;
use linklearn::errors::LinkLearnError;
use linklearn::models::reservations::requests::NewReservation;
use linklearn::storage::Storage;
use linklearn::storage::sea_orm_storage::SeaOrmStorage;

const CONTENDERS: usize = 6;

/// 测试结束时删除数据库文件及 WAL 附属文件
struct TempDb(PathBuf);

impl TempDb {
    fn new(name: &str) -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let file = format!("linklearn-{name}-{}-{nanos}.db", std::process::id());
        Self(std::env::temp_dir().join(file))
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.0.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

async fn file_storage(db: &TempDb) -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: db.0.to_string_lossy().into_owned(),
        pool_size: 4,
        timeout: 10,
    };
    Arc::new(SeaOrmStorage::connect(&config).await.expect("file storage"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_yield_one_winner() {
    let db = TempDb::new("booking");
    let storage = file_storage(&db).await;

    let subject = common::subject(&storage, "Math").await;
    let teacher = common::teacher(&storage, "Ana", "ana@example.com", &[subject.id]).await;
    let mut students = Vec::with_capacity(CONTENDERS);
    for i in 0..CONTENDERS {
        students.push(common::student(&storage, &format!("student{i}@example.com")).await);
    }

    // 每个课时一轮：一对一课时与小组课时都只能有一条有效预约
    for (round, max_students) in [1, 1, 3, 3].into_iter().enumerate() {
        let slots = common::slots(
            &storage,
            teacher.id,
            common::upcoming(round as u32 + 1, 9),
            max_students,
        )
        .await;
        let target = slots[0].id;

        let handles: Vec<_> = students
            .iter()
            .map(|student| {
                let storage = storage.clone();
                let booking = NewReservation {
                    student_id: student.id,
                    teacher_id: teacher.id,
                    subject_id: subject.id,
                    schedule_id: target,
                    datetime: None,
                    day_of_week: None,
                    start_time: None,
                };
                tokio::spawn(
                    async move { storage.create_reservation(booking, common::offset()).await },
                )
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(LinkLearnError::Conflict(_)) => {}
                Err(e) => panic!("round {round}: unexpected error {e:?}"),
            }
        }
        assert_eq!(winners, 1, "round {round}");
        assert_eq!(common::slot(&storage, target).await.current_students, 1);
    }
}
