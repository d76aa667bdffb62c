pub mod batch_caption_use_case;
pub mod batch_report;
pub mod caption_video_use_case;
pub mod pipeline_logger;
