// ==========================================
// 引擎端到端集成测试
// ==========================================
// 职责: 验证 加载 → 建模 → 目标 → 求解 → 物化落库 全链路
// 场景: 标准场景 A-D + 守恒性质 + 失败路径幂等性
// ==========================================

mod test_helpers;

use std::collections::BTreeMap;
use supply_chain_opt::domain::types::RunStatus;
use supply_chain_opt::engine::OptimizationRunner;
use supply_chain_opt::repository::{OptimalResultRepository, OptimizationRunRepository};
use test_helpers::*;

const TOLERANCE: f64 = 1e-6;

// ==========================================
// 场景A: 最小可行网络
// ==========================================

#[test]
fn test_scenario_a_completes_with_expected_cost() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    seed_scenario_a(&conn.lock().unwrap());

    let runner = OptimizationRunner::from_connection(conn.clone());
    let report = runner.execute("run-a");

    assert_eq!(report.status, RunStatus::Completed);
    assert!((report.total_cost.unwrap() - 200.0).abs() < TOLERANCE);

    // 落库校验
    let run_repo = OptimizationRunRepository::from_connection(conn.clone());
    let run = run_repo.find_by_id("run-a").unwrap().unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert!((run.total_cost.unwrap() - 200.0).abs() < TOLERANCE);
    assert!(run.is_consistent());

    let result_repo = OptimalResultRepository::from_connection(conn);
    let shipments = result_repo.find_shipments_by_run("run-a").unwrap();
    let production = result_repo.find_production_by_run("run-a").unwrap();

    // 两条通道各一行, 数量均为 50
    assert_eq!(shipments.len(), 2);
    for s in &shipments {
        assert!((s.quantity_shipped - 50.0).abs() < TOLERANCE);
    }
    assert!(shipments
        .iter()
        .any(|s| s.origin_facility_id == "P1" && s.destination_id == "W1"));
    assert!(shipments
        .iter()
        .any(|s| s.origin_facility_id == "W1" && s.destination_id == "C1"));

    // 一行生产结果, 数量 50
    assert_eq!(production.len(), 1);
    assert_eq!(production[0].facility_id, "P1");
    assert!((production[0].quantity_produced - 50.0).abs() < TOLERANCE);
}

// ==========================================
// 场景B: 需求超过产能 => 不可行
// ==========================================

#[test]
fn test_scenario_b_infeasible_demand_fails_without_rows() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    seed_scenario_b(&conn.lock().unwrap());

    let runner = OptimizationRunner::from_connection(conn.clone());
    let report = runner.execute("run-b");

    assert_eq!(report.status, RunStatus::Failed);
    assert!(report.total_cost.is_none());

    let run_repo = OptimizationRunRepository::from_connection(conn.clone());
    let run = run_repo.find_by_id("run-b").unwrap().unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert!(run.total_cost.is_none());

    let result_repo = OptimalResultRepository::from_connection(conn);
    assert!(result_repo.find_shipments_by_run("run-b").unwrap().is_empty());
    assert!(result_repo.find_production_by_run("run-b").unwrap().is_empty());
}

// ==========================================
// 场景C: 两客户分流, 仓库流平衡
// ==========================================

#[test]
fn test_scenario_c_flow_balance_at_warehouse() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    seed_scenario_c(&conn.lock().unwrap());

    let runner = OptimizationRunner::from_connection(conn.clone());
    let report = runner.execute("run-c");
    assert_eq!(report.status, RunStatus::Completed);

    let result_repo = OptimalResultRepository::from_connection(conn);
    let shipments = result_repo.find_shipments_by_run("run-c").unwrap();

    // 入仓 50, 出仓 30 + 20
    let inflow: f64 = shipments
        .iter()
        .filter(|s| s.destination_id == "W1")
        .map(|s| s.quantity_shipped)
        .sum();
    let outflow: f64 = shipments
        .iter()
        .filter(|s| s.origin_facility_id == "W1")
        .map(|s| s.quantity_shipped)
        .sum();

    assert!((inflow - 50.0).abs() < TOLERANCE);
    assert!((outflow - 50.0).abs() < TOLERANCE);
    assert!((inflow - outflow).abs() < TOLERANCE);

    let to_c1: f64 = shipments
        .iter()
        .filter(|s| s.destination_id == "C1")
        .map(|s| s.quantity_shipped)
        .sum();
    let to_c2: f64 = shipments
        .iter()
        .filter(|s| s.destination_id == "C2")
        .map(|s| s.quantity_shipped)
        .sum();
    assert!((to_c1 - 30.0).abs() < TOLERANCE);
    assert!((to_c2 - 20.0).abs() < TOLERANCE);
}

// ==========================================
// 场景D: 零流量通道不产出结果行
// ==========================================

#[test]
fn test_scenario_d_zero_flow_lane_emits_no_row() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    seed_scenario_d(&conn.lock().unwrap());

    let runner = OptimizationRunner::from_connection(conn.clone());
    let report = runner.execute("run-d");
    assert_eq!(report.status, RunStatus::Completed);

    // 最优路径经 W1; 经 W2 的贵通道流量为零, 低于重要性阈值
    let result_repo = OptimalResultRepository::from_connection(conn);
    let shipments = result_repo.find_shipments_by_run("run-d").unwrap();
    assert!(!shipments
        .iter()
        .any(|s| s.origin_facility_id == "W2" || s.destination_id == "W2"));
    assert_eq!(shipments.len(), 2);

    // 总成本走便宜路径: 50*(1+2+1)
    assert!((report.total_cost.unwrap() - 200.0).abs() < TOLERANCE);
}

// ==========================================
// 守恒性质
// ==========================================

#[test]
fn test_production_equals_plant_outbound() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    seed_scenario_c(&conn.lock().unwrap());

    let runner = OptimizationRunner::from_connection(conn.clone());
    assert_eq!(runner.execute("run-p").status, RunStatus::Completed);

    let result_repo = OptimalResultRepository::from_connection(conn);
    let shipments = result_repo.find_shipments_by_run("run-p").unwrap();
    let production = result_repo.find_production_by_run("run-p").unwrap();

    // 每 (工厂, 产品): 生产量 == 工厂出货量
    let mut outbound: BTreeMap<(String, String), f64> = BTreeMap::new();
    for s in &shipments {
        if s.origin_facility_id == "P1" {
            *outbound
                .entry((s.origin_facility_id.clone(), s.product_id.clone()))
                .or_insert(0.0) += s.quantity_shipped;
        }
    }
    for p in &production {
        let shipped = outbound
            .get(&(p.facility_id.clone(), p.product_id.clone()))
            .copied()
            .unwrap_or(0.0);
        assert!((p.quantity_produced - shipped).abs() < TOLERANCE);
    }
}

#[test]
fn test_demand_satisfaction_with_positive_demand() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    seed_scenario_c(&conn.lock().unwrap());

    let runner = OptimizationRunner::from_connection(conn.clone());
    assert_eq!(runner.execute("run-q").status, RunStatus::Completed);

    let result_repo = OptimalResultRepository::from_connection(conn);
    let shipments = result_repo.find_shipments_by_run("run-q").unwrap();

    // 每正需求 (客户, 产品): 入流 >= 需求
    for (customer, demand) in [("C1", 30.0), ("C2", 20.0)] {
        let inflow: f64 = shipments
            .iter()
            .filter(|s| s.destination_id == customer && s.product_id == "SKU1")
            .map(|s| s.quantity_shipped)
            .sum();
        assert!(inflow >= demand - TOLERANCE);
    }
}

// ==========================================
// 失败路径
// ==========================================

#[test]
fn test_empty_reference_table_fails_with_no_rows() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    // 不播种任何参考数据 => DataUnavailable

    let runner = OptimizationRunner::from_connection(conn.clone());
    let report = runner.execute("run-empty");

    assert_eq!(report.status, RunStatus::Failed);
    assert!(report.failure_reason.is_some());

    // 终态已写, 无结果行
    let run_repo = OptimizationRunRepository::from_connection(conn.clone());
    let run = run_repo.find_by_id("run-empty").unwrap().unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert!(run.total_cost.is_none());

    let result_repo = OptimalResultRepository::from_connection(conn);
    assert!(result_repo
        .find_shipments_by_run("run-empty")
        .unwrap()
        .is_empty());
    assert!(result_repo
        .find_production_by_run("run-empty")
        .unwrap()
        .is_empty());
}

#[test]
fn test_duplicate_run_id_leaves_first_run_untouched() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    seed_scenario_a(&conn.lock().unwrap());

    let runner = OptimizationRunner::from_connection(conn.clone());
    let first = runner.execute("run-dup");
    assert_eq!(first.status, RunStatus::Completed);

    // 同一 run_id 再次触发: 插入冲突, 已有记录不被触碰
    let second = runner.execute("run-dup");
    assert_eq!(second.status, RunStatus::Failed);
    assert!(second.failure_reason.is_some());

    let run_repo = OptimizationRunRepository::from_connection(conn.clone());
    let run = run_repo.find_by_id("run-dup").unwrap().unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert!((run.total_cost.unwrap() - 200.0).abs() < TOLERANCE);

    // 结果行没有被重复写入
    let result_repo = OptimalResultRepository::from_connection(conn);
    assert_eq!(result_repo.find_shipments_by_run("run-dup").unwrap().len(), 2);
    assert_eq!(
        result_repo.find_production_by_run("run-dup").unwrap().len(),
        1
    );
}

// ==========================================
// 成本查找: 重复通道首条匹配
// ==========================================

#[test]
fn test_duplicate_lane_cost_uses_first_row() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    {
        let guard = conn.lock().unwrap();
        insert_facility(&guard, "P1", "PLANT", Some(100.0), 1.0);
        insert_facility(&guard, "W1", "WAREHOUSE", None, 0.0);
        insert_product(&guard, "SKU1");
        insert_lane(&guard, "P1", "W1", 2.0);
        insert_lane(&guard, "P1", "W1", 99.0); // 重复通道行, 应被首条遮蔽
        insert_lane(&guard, "W1", "C1", 1.0);
        insert_order(&guard, "C1", "SKU1", 50.0);
    }

    let runner = OptimizationRunner::from_connection(conn);
    let report = runner.execute("run-lane-dup");

    assert_eq!(report.status, RunStatus::Completed);
    // 首条成本 2 生效: 50*(1+2+1)=200; 若取后条则为 5050
    assert!((report.total_cost.unwrap() - 200.0).abs() < TOLERANCE);
}
