// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dwell_core::OnOff;
use dwell_runtime::{Scheduler, VirtualScheduler};
use dwell_stream::prelude::*;
use dwell_test_utils::fixtures::{at, ticks, SwitchTransition};
use dwell_test_utils::{test_channel, values_now, TestEntity};
use std::time::Duration;

#[test]
fn test_limit_true_duration_last_changed_shorter_ago_than_threshold_true() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result = transitions.limit_true_duration(ticks(1), entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_limit_true_duration_last_changed_longer_ago_than_threshold_false() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(11));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result = transitions.limit_true_duration(ticks(1), entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_limit_true_duration_subscribe_after_threshold_passes_false() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result = transitions.limit_true_duration(ticks(1), entity.clone(), scheduler.clone());

    // Act
    entity.overwrite(OnOff::On, at(9));

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_limit_true_duration_last_changed_halfway_false_after_remaining_time() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(12));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result = transitions.limit_true_duration(ticks(4), entity, scheduler.clone());

    // Act & Assert
    assert_eq!(values_now(&mut result), vec![true]);

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_limit_true_duration_predicate_last_changed_shorter_ago_than_threshold_true() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::Off, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result = transitions.limit_true_duration_by(
        Duration::from_secs(60),
        Predicate::is_off(),
        entity,
        scheduler.clone(),
    );

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_limit_true_duration_predicate_last_changed_longer_ago_than_threshold_false() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(11));
    let entity = TestEntity::with_state(OnOff::Off, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result =
        transitions.limit_true_duration_by(ticks(1), Predicate::is_off(), entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_limit_true_duration_predicate_subscribe_after_threshold_passes_false() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result = transitions.limit_true_duration_by(
        ticks(1),
        Predicate::is_off(),
        entity.clone(),
        scheduler.clone(),
    );

    // Act
    entity.overwrite(OnOff::Off, at(9));

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_limit_true_duration_predicate_last_changed_halfway_false_after_remaining_time() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(12));
    let entity = TestEntity::with_state(OnOff::Off, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result =
        transitions.limit_true_duration_by(ticks(4), Predicate::is_off(), entity, scheduler.clone());

    // Act & Assert
    assert_eq!(values_now(&mut result), vec![true]);

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_limit_true_duration_predicate_false_at_subscription() {
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::Off, at(0));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    let mut result = transitions.limit_true_duration(ticks(4), entity, scheduler.clone());

    assert_eq!(values_now(&mut result), vec![false]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_limit_true_duration_unchanged_true_never_extends() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.limit_true_duration(ticks(4), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![true]);

    // Act & Assert
    for _ in 0..3 {
        scheduler.advance_by(ticks(1));
        tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();
        assert_eq!(values_now(&mut result), Vec::<bool>::new());
    }

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![false]);

    tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();
    scheduler.advance_by(ticks(10));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
}

#[test]
fn test_limit_true_duration_turning_off_before_deadline_cancels() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.limit_true_duration(ticks(4), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![true]);

    // Act
    scheduler.advance_by(ticks(1));
    tx.send(entity.change(OnOff::Off, scheduler.now())).unwrap();

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
    assert_eq!(scheduler.pending_count(), 0);

    scheduler.advance_by(ticks(10));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
}

#[test]
fn test_limit_true_duration_rearms_after_turning_on_again() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.limit_true_duration(ticks(2), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![true]);
    scheduler.advance_by(ticks(2));
    assert_eq!(values_now(&mut result), vec![false]);

    // Act
    tx.send(entity.change(OnOff::Off, scheduler.now())).unwrap();
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
    scheduler.advance_by(ticks(1));
    tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
    scheduler.advance_by(ticks(2));
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_limit_true_duration_turning_on_with_stale_last_changed_stays_false() {
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::Off, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.limit_true_duration(ticks(2), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    tx.send(entity.change(OnOff::On, at(5))).unwrap();

    assert_eq!(values_now(&mut result), Vec::<bool>::new());
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_limit_true_duration_zero_threshold_never_true() {
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.limit_true_duration(Duration::ZERO, entity.clone(), scheduler.clone());

    assert_eq!(values_now(&mut result), vec![false]);

    tx.send(entity.change(OnOff::Off, at(0))).unwrap();
    tx.send(entity.change(OnOff::On, at(0))).unwrap();
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
}

#[test]
fn test_limit_true_duration_with_options() {
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::Off, at(0));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let options = GateOptions::new(GateMode::WhenTrueFor, ticks(3), Predicate::is_off());

    let mut result = transitions.limit_true_duration_with(options, entity, scheduler.clone());

    assert_eq!(result.options().mode(), GateMode::LimitTrueDuration);
    assert_eq!(values_now(&mut result), vec![true]);
    scheduler.advance_by(ticks(3));
    assert_eq!(values_now(&mut result), vec![false]);
}
