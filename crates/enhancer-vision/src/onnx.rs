//! ONNX 추론 백엔드.
//!
//! tract-onnx 기반 (순수 Rust, CPU). `ModelLoader` / `InferenceModel` 포트 구현.
//!
//! 초해상도 모델은 보통 입력 H, W가 동적이라 그대로는 최적화할 수 없다.
//! 입력 크기마다 shape을 고정해 최적화한 실행 계획을 만들고
//! LRU 캐시에 보관해 같은 크기의 프레임에서는 재사용한다.

use std::num::NonZeroUsize;
use std::path::Path;

use enhancer_core::error::CoreError;
use enhancer_core::models::tensor::Tensor;
use enhancer_core::ports::enhance::{InferenceModel, ModelLoader};
use lru::LruCache;
use tracing::{debug, info, warn};
use tract_onnx::prelude::{
    tvec, Datum, Framework, InferenceFact, InferenceModel as OnnxGraph, InferenceModelExt,
    Tensor as TractTensor, TypedModel, TypedRunnableModel,
};

/// 기본 실행 계획 캐시 용량
const DEFAULT_PLAN_CACHE_CAPACITY: usize = 4;

/// 캐시 키: (입력 높이, 입력 너비)
type PlanKey = (usize, usize);

type Plan = TypedRunnableModel<TypedModel>;

/// ONNX 모델 로더: `ModelLoader` 포트 구현
#[derive(Debug, Clone)]
pub struct OnnxModelLoader {
    plan_cache_capacity: NonZeroUsize,
}

impl OnnxModelLoader {
    pub fn new(plan_cache_capacity: usize) -> Self {
        Self {
            plan_cache_capacity: NonZeroUsize::new(plan_cache_capacity)
                .or_else(|| NonZeroUsize::new(DEFAULT_PLAN_CACHE_CAPACITY))
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Default for OnnxModelLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PLAN_CACHE_CAPACITY)
    }
}

impl ModelLoader for OnnxModelLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn InferenceModel>, CoreError> {
        let meta = std::fs::metadata(path)
            .map_err(|e| CoreError::ModelLoad(format!("{}: {e}", path.display())))?;
        if !meta.is_file() {
            return Err(CoreError::ModelLoad(format!(
                "{}: 일반 파일이 아님",
                path.display()
            )));
        }

        let graph = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| CoreError::ModelLoad(format!("{}: {e:#}", path.display())))?;

        if graph.inputs.is_empty() || graph.outputs.is_empty() {
            return Err(CoreError::ModelLoad(format!(
                "{}: 입력 또는 출력이 선언되지 않음",
                path.display()
            )));
        }
        if graph.inputs.len() > 1 || graph.outputs.len() > 1 {
            warn!(
                "모델 입력 {}개 / 출력 {}개, 첫 번째만 사용",
                graph.inputs.len(),
                graph.outputs.len()
            );
        }

        info!(
            "ONNX 모델 파싱 완료: {} ({} 바이트)",
            path.display(),
            meta.len()
        );
        Ok(Box::new(OnnxModel::new(graph, self.plan_cache_capacity)))
    }
}

/// 로드된 ONNX 모델: `InferenceModel` 포트 구현
pub struct OnnxModel {
    /// shape 미고정 원본 그래프
    graph: OnnxGraph,
    /// 입력 크기별 최적화된 실행 계획
    plans: LruCache<PlanKey, Plan>,
}

impl OnnxModel {
    fn new(graph: OnnxGraph, capacity: NonZeroUsize) -> Self {
        Self {
            graph,
            plans: LruCache::new(capacity),
        }
    }

    /// `[1, 3, h, w]` 입력에 맞춘 실행 계획 생성
    fn build_plan(&self, h: usize, w: usize) -> Result<Plan, CoreError> {
        let fact = InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, h, w));
        self.graph
            .clone()
            .with_input_fact(0, fact)
            .and_then(|g| g.into_optimized())
            .and_then(|g| g.into_runnable())
            .map_err(|e| CoreError::Enhancement(format!("{h}x{w} 실행 계획 생성 실패: {e:#}")))
    }

    fn plan_for(&mut self, h: usize, w: usize) -> Result<&Plan, CoreError> {
        let key = (h, w);
        if !self.plans.contains(&key) {
            let plan = self.build_plan(h, w)?;
            debug!("실행 계획 캐시 추가: {h}x{w} (캐시 {}개)", self.plans.len() + 1);
            self.plans.put(key, plan);
        }
        self.plans
            .get(&key)
            .ok_or_else(|| CoreError::Internal("실행 계획 캐시 조회 실패".to_string()))
    }
}

impl InferenceModel for OnnxModel {
    fn infer(&mut self, input: &Tensor) -> Result<Tensor, CoreError> {
        let [_, _, h, w] = input.shape();
        let tract_input = TractTensor::from_shape(&input.shape(), input.data())
            .map_err(|e| CoreError::Enhancement(format!("입력 텐서 생성 실패: {e:#}")))?;

        let plan = self.plan_for(h, w)?;
        let outputs = plan
            .run(tvec!(tract_input.into()))
            .map_err(|e| CoreError::Enhancement(format!("추론 실패: {e:#}")))?;

        let first = outputs
            .first()
            .ok_or_else(|| CoreError::Enhancement("모델 출력 없음".to_string()))?;
        let view = first
            .to_array_view::<f32>()
            .map_err(|e| CoreError::Enhancement(format!("출력이 f32가 아님: {e:#}")))?;

        let shape = view.shape().to_vec();
        Tensor::from_shape(&shape, view.iter().copied().collect())
    }
}
